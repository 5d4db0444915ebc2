// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! A single `pack` subcommand that streams every file in a directory into a
//! ZIP archive. Exists to exercise the core end-to-end, not as a general
//! archiving tool - there is no `unpack`, no filters, no incremental update.

use archstream_domain::value_objects::CompressionMethod;
use clap::Parser;
use std::path::PathBuf;

use crate::config::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "archstream", about = "Stream a directory into a ZIP archive")]
pub struct Cli {
    /// Directory whose immediate files become archive entries.
    pub source_dir: PathBuf,

    /// Path of the ZIP file to write.
    pub output: PathBuf,

    /// Store entries uncompressed instead of deflating them.
    #[arg(long)]
    pub stored: bool,

    /// Override ARCHSTREAM_LOG_LEVEL for this run.
    #[arg(long, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    pub fn compression(&self) -> Option<CompressionMethod> {
        self.stored.then_some(CompressionMethod::Stored)
    }
}

fn parse_log_level(raw: &str) -> Result<LogLevel, String> {
    match raw.to_ascii_lowercase().as_str() {
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        other => Err(format!("unrecognized log level: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_flag_into_compression_override() {
        let cli = Cli::parse_from(["archstream", "in", "out.zip", "--stored"]);
        assert_eq!(cli.compression(), Some(CompressionMethod::Stored));
    }

    #[test]
    fn defaults_to_no_compression_override() {
        let cli = Cli::parse_from(["archstream", "in", "out.zip"]);
        assert_eq!(cli.compression(), None);
    }

    #[test]
    fn parses_log_level_flag() {
        let cli = Cli::parse_from(["archstream", "in", "out.zip", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }
}
