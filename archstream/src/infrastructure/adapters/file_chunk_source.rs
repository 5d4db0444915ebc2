// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Chunk Source
//!
//! Adapts a file on disk into a [`ChunkSource`], reading it in fixed-size
//! chunks with `tokio::fs`. This is purely an infrastructure-layer
//! convenience for the CLI demo ("pack this directory") - the core itself
//! has no filesystem I/O of its own, by design (see the crate's scope).

use archstream_domain::{ChunkSource, ResourceStream, StreamError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Reads a file in fixed-size chunks. The file is not opened until the first
/// [`ChunkSource::next_chunk`] call, so constructing one (directly, or via
/// [`wrap_file_chunk_source`]) performs no I/O.
pub struct FileChunkSource {
    path: PathBuf,
    file: Option<File>,
    chunk_size: usize,
}

impl FileChunkSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[async_trait]
impl ChunkSource for FileChunkSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.file.is_none() {
            let file = File::open(&self.path)
                .await
                .map_err(|e| StreamError::source_failure(format!("opening {}: {e}", self.path.display())))?;
            self.file = Some(file);
        }

        let mut buf = vec![0u8; self.chunk_size];
        let read = self
            .file
            .as_mut()
            .unwrap()
            .read(&mut buf)
            .await
            .map_err(|e| StreamError::source_failure(format!("reading {}: {e}", self.path.display())))?;
        if read == 0 {
            return Ok(None);
        }
        buf.truncate(read);
        Ok(Some(buf))
    }
}

/// Wraps [`FileChunkSource`] in a [`ResourceStream`] so re-packing the same
/// path after a retry re-reads the file from the start rather than reusing a
/// half-consumed reader.
pub fn wrap_file_chunk_source(path: PathBuf) -> ResourceStream<PathBuf> {
    ResourceStream::wrap(FileChunkSource::new, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn reads_a_small_file_as_a_single_chunk() {
        let mut path = std::env::temp_dir();
        path.push(format!("archstream-test-{}.bin", std::process::id()));
        {
            let mut file = File::create(&path).await.unwrap();
            file.write_all(b"hello file").await.unwrap();
        }

        let mut source = FileChunkSource::new(path.clone());
        let chunk = source.next_chunk().await.unwrap();
        assert_eq!(chunk, Some(b"hello file".to_vec()));
        assert_eq!(source.next_chunk().await.unwrap(), None);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn wrapped_source_reopens_the_file_on_each_iteration() {
        let mut path = std::env::temp_dir();
        path.push(format!("archstream-test-wrap-{}.bin", std::process::id()));
        {
            let mut file = File::create(&path).await.unwrap();
            file.write_all(b"restart me").await.unwrap();
        }

        let resource = wrap_file_chunk_source(path.clone());
        let mut first = resource.iterate();
        let mut second = resource.iterate();
        assert_eq!(first.next_chunk().await.unwrap(), Some(b"restart me".to_vec()));
        assert_eq!(second.next_chunk().await.unwrap(), Some(b"restart me".to_vec()));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
