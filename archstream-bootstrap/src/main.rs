// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Binary entrypoint: parses the `pack` CLI, resolves configuration from the
//! environment and CLI overrides, installs logging and shutdown handling,
//! then streams every file in a directory into a ZIP archive.

use anyhow::{Context, Result};
use archstream::{zip_entry, zip_stream, DeduplicationPolicy};
use archstream_bootstrap::{cli::Cli, config::AppConfig, logger, shutdown::ShutdownCoordinator};
use archstream_domain::ChunkSource;
use clap::Parser;
use tokio::io::AsyncWriteExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(level) = cli.log_level {
        config = AppConfig::builder()
            .log_level(level)
            .compression(cli.compression().unwrap_or_else(|| config.compression()))
            .build();
    } else if let Some(compression) = cli.compression() {
        config = AppConfig::builder()
            .log_level(config.log_level())
            .compression(compression)
            .build();
    }

    logger::init_tracing(&config);
    let shutdown = ShutdownCoordinator::install();

    let entries = collect_entries(&cli.source_dir).await?;
    tracing::info!(count = entries.len(), "packing directory");

    let mut archive = zip_stream(entries, DeduplicationPolicy::default(), config.compression());
    let mut output = tokio::fs::File::create(&cli.output)
        .await
        .with_context(|| format!("creating {}", cli.output.display()))?;

    let cancel = shutdown.token();
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                anyhow::bail!(archstream_domain::StreamError::cancelled("shutdown requested during pack"));
            }
            chunk = archive.next_chunk() => {
                match chunk? {
                    Some(bytes) => output.write_all(&bytes).await.context("writing archive bytes")?,
                    None => break,
                }
            }
        }
    }

    output.flush().await.context("flushing archive output")?;
    tracing::info!(output = %cli.output.display(), "archive written");
    Ok(())
}

async fn collect_entries(dir: &std::path::Path) -> Result<Vec<archstream_domain::ZipEntry>> {
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading directory {}", dir.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.context("reading directory entry")? {
        let metadata = entry.metadata().await.context("reading entry metadata")?;
        if !metadata.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let source = archstream::infrastructure::adapters::FileChunkSource::new(entry.path());
        entries.push(zip_entry(name, source));
    }
    Ok(entries)
}
