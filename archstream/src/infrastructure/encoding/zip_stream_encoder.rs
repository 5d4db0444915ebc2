// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # ZIP Stream Encoder
//!
//! The infrastructure realization of the streaming core's ZIP encoder: an
//! `async-stream`-generated byte [`Stream`], itself exposed as a
//! [`ChunkSource`] so an encoder can be nested as another entry's source (or
//! handed straight to an HTTP body, outside this core's scope).
//!
//! The encoder owns its entries, its deduplicator, and the running archive
//! journal for its entire lifetime; nothing here is shared across archives.

use crate::infrastructure::encoding::deflate;
use crate::infrastructure::encoding::zip_layout::{central_file_header, data_descriptor, end_of_central_directory, local_file_header, DOS_DATE, DOS_TIME};
use archstream_domain::value_objects::CompressionMethod;
use archstream_domain::{CentralDirectoryRecord, ChunkSource, NameDeduplicator, StreamError, ZipEntry};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use tracing::{debug, warn};

type ArchiveStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, StreamError>> + Send>>;

/// Consumes an ordered list of entries and a deduplicator, producing the
/// bytes of a valid streamed ZIP archive. Itself a [`ChunkSource`], so it can
/// be driven the same way as any entry's own source.
///
/// Construction performs no work: the archive generator does not start
/// running until the first [`ChunkSource::next_chunk`] call, matching the
/// core's laziness guarantee.
pub struct ZipStreamEncoder {
    entries: Option<Vec<ZipEntry>>,
    dedup: Option<Box<dyn NameDeduplicator>>,
    method: CompressionMethod,
    stream: Option<ArchiveStream>,
}

impl ZipStreamEncoder {
    pub fn new(entries: Vec<ZipEntry>, dedup: Box<dyn NameDeduplicator>, method: CompressionMethod) -> Self {
        Self {
            entries: Some(entries),
            dedup: Some(dedup),
            method,
            stream: None,
        }
    }
}

#[async_trait]
impl ChunkSource for ZipStreamEncoder {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.stream.is_none() {
            let entries = self.entries.take().unwrap_or_default();
            let dedup = self
                .dedup
                .take()
                .unwrap_or_else(|| Box::new(archstream_domain::NoopDeduplicator));
            self.stream = Some(Box::pin(archive_stream(entries, dedup, self.method)));
        }

        match self.stream.as_mut().unwrap().next().await {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

fn archive_stream(
    entries: Vec<ZipEntry>,
    mut dedup: Box<dyn NameDeduplicator>,
    method: CompressionMethod,
) -> impl Stream<Item = Result<Vec<u8>, StreamError>> {
    try_stream! {
        let mut position: u64 = 0;
        let mut journal: Vec<CentralDirectoryRecord> = Vec::with_capacity(entries.len());

        for entry in entries {
            let (incoming_name, mut source) = entry.into_parts();
            let name = dedup.accept(&incoming_name)?;
            debug!(entry = %name, method = ?method, "writing zip entry");

            let header = local_file_header(&name, method);
            let local_header_offset = position;
            position += header.len() as u64;
            yield header;

            let mut hasher = crc32fast::Hasher::new();
            let mut uncompressed_size: u64 = 0;
            let mut compressed_size: u64 = 0;
            let mut compressor = matches!(method, CompressionMethod::Deflate).then(deflate::new_compressor);

            loop {
                let next = source.next_chunk().await?;
                let Some(bytes) = next else { break };

                hasher.update(&bytes);
                uncompressed_size += bytes.len() as u64;

                let out = match compressor.as_mut() {
                    Some(compressor) => deflate::compress_chunk(compressor, &bytes)?,
                    None => bytes,
                };
                if !out.is_empty() {
                    compressed_size += out.len() as u64;
                    position += out.len() as u64;
                    yield out;
                }
            }
            // Drop the source as soon as its payload is exhausted, releasing
            // any scoped resource (file handle, socket) before moving on.
            drop(source);

            if let Some(compressor) = compressor.as_mut() {
                let tail = deflate::finish(compressor)?;
                if !tail.is_empty() {
                    compressed_size += tail.len() as u64;
                    position += tail.len() as u64;
                    yield tail;
                }
            }

            let crc32 = hasher.finalize();
            let descriptor = data_descriptor(crc32, compressed_size, uncompressed_size);
            position += descriptor.len() as u64;
            yield descriptor;

            let record = CentralDirectoryRecord {
                name,
                method,
                crc32,
                compressed_size,
                uncompressed_size,
                local_header_offset,
                dos_time: DOS_TIME,
                dos_date: DOS_DATE,
            };
            if record.requires_zip64() {
                warn!(entry = %record.name, "entry promoted archive to ZIP64");
            }
            journal.push(record);
        }

        let central_directory_offset = position;
        let mut central_directory_size: u64 = 0;
        for record in &journal {
            let bytes = central_file_header(record);
            central_directory_size += bytes.len() as u64;
            yield bytes;
        }

        yield end_of_central_directory(journal.len(), central_directory_size, central_directory_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archstream_domain::value_objects::zip_entry;
    use archstream_domain::{BufferSource, DefaultDeduplicator, NamePattern, NoopDeduplicator};

    async fn drain(mut source: impl ChunkSource) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = source.next_chunk().await.unwrap() {
            out.extend(chunk);
        }
        out
    }

    #[tokio::test]
    async fn empty_archive_is_just_the_end_of_central_directory() {
        let encoder = ZipStreamEncoder::new(Vec::new(), Box::new(NoopDeduplicator), CompressionMethod::Stored);
        let bytes = drain(encoder).await;
        assert_eq!(bytes.len(), 22);
        assert_eq!(&bytes[0..4], &0x0605_4b50u32.to_le_bytes());
    }

    #[tokio::test]
    async fn single_stored_entry_round_trips_through_flate2() {
        let entries = vec![zip_entry("a.txt", BufferSource::new(b"hi".to_vec()))];
        let encoder = ZipStreamEncoder::new(entries, Box::new(NoopDeduplicator), CompressionMethod::Stored);
        let bytes = drain(encoder).await;

        assert_eq!(&bytes[0..4], &0x0403_4b50u32.to_le_bytes());
        // local header (30 + 5 name) + payload (2) + data descriptor (16) +
        // central header (46 + 5 name) + EOCD (22).
        assert_eq!(bytes.len(), 30 + 5 + 2 + 16 + 46 + 5 + 22);

        let central_sig_pos = bytes.windows(4).position(|w| w == 0x0201_4b50u32.to_le_bytes());
        assert!(central_sig_pos.is_some());
        // Central directory only appears after the local payload + descriptor.
        assert!(central_sig_pos.unwrap() >= 30 + 5 + 2 + 16);
    }

    #[tokio::test]
    async fn deduplicates_repeated_names_before_writing_headers() {
        let entries = vec![
            zip_entry("a.txt", BufferSource::new(Vec::new())),
            zip_entry("a.txt", BufferSource::new(Vec::new())),
            zip_entry("a.txt", BufferSource::new(Vec::new())),
        ];
        let dedup = DefaultDeduplicator::new(NamePattern::default_pattern(), archstream_domain::default_reconstructor());
        let encoder = ZipStreamEncoder::new(entries, Box::new(dedup), CompressionMethod::Stored);
        let bytes = drain(encoder).await;

        assert!(contains(&bytes, b"a.txt"));
        assert!(contains(&bytes, b"a (1).txt"));
        assert!(contains(&bytes, b"a (2).txt"));
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[tokio::test]
    async fn source_failure_mid_payload_propagates_and_aborts() {
        struct FailsAfterOne {
            yielded: bool,
        }

        #[async_trait]
        impl ChunkSource for FailsAfterOne {
            async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
                if !self.yielded {
                    self.yielded = true;
                    Ok(Some(b"chunk-one".to_vec()))
                } else {
                    Err(StreamError::source_failure("broken pipe"))
                }
            }
        }

        let entries = vec![zip_entry("a.bin", FailsAfterOne { yielded: false })];
        let mut encoder = ZipStreamEncoder::new(entries, Box::new(NoopDeduplicator), CompressionMethod::Stored);

        // Local file header.
        assert!(encoder.next_chunk().await.unwrap().is_some());
        // First payload chunk.
        assert!(encoder.next_chunk().await.unwrap().is_some());
        // Second pull surfaces the source failure.
        assert!(encoder.next_chunk().await.is_err());
    }

    #[tokio::test]
    async fn constructing_the_encoder_does_not_touch_any_source() {
        struct PanicsIfPolled;

        #[async_trait]
        impl ChunkSource for PanicsIfPolled {
            async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
                panic!("source polled before the consumer pulled the encoder");
            }
        }

        let entries = vec![zip_entry("never.bin", PanicsIfPolled)];
        let _encoder = ZipStreamEncoder::new(entries, Box::new(NoopDeduplicator), CompressionMethod::Stored);
        // Dropping without ever calling next_chunk must not have polled PanicsIfPolled.
    }
}
