// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A single hierarchical error type for the streaming composition core. Every
//! fallible operation in the core - pulling a chunk, deduplicating a name,
//! growing the archive past 32-bit limits - reports through this type so a
//! consumer driving the encoder's `next()` sees one error surface regardless
//! of which component actually failed.
//!
//! ## Error Categories
//!
//! - **SourceExhausted**: a [`crate::services::chunk_source::ChunkSource`] backed by
//!   a [`crate::services::resource_stream::ResourceStream`] was re-iterated past
//!   what the wrapped factory can restart.
//! - **SourceFailure**: an entry's chunk source failed mid-stream.
//! - **DedupFailure**: the deduplicator could not produce a unique name.
//! - **EncodingOverflow**: a counter exceeded what the non-ZIP64 record layout
//!   can represent; callers should not see this if the encoder extends to
//!   ZIP64 correctly, so its presence indicates a logic error or corrupt input.
//! - **Cancelled**: the consuming task was dropped before the archive finished.
//! - **Io**: propagated verbatim from the standard library or an async runtime.

use thiserror::Error;

/// Errors produced by the streaming composition core.
///
/// Propagation policy across the whole core is fail-fast: nothing here is
/// retried internally, and a failure on one entry aborts the entire archive.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("chunk source exhausted: {0}")]
    SourceExhausted(String),

    #[error("chunk source failed: {0}")]
    SourceFailure(String),

    #[error("name deduplication failed: {0}")]
    DedupFailure(String),

    #[error("archive counters overflowed 32-bit ZIP layout: {0}")]
    EncodingOverflow(String),

    #[error("archive stream cancelled: {0}")]
    Cancelled(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    pub fn source_exhausted(msg: impl Into<String>) -> Self {
        Self::SourceExhausted(msg.into())
    }

    pub fn source_failure(msg: impl Into<String>) -> Self {
        Self::SourceFailure(msg.into())
    }

    pub fn dedup_failure(msg: impl Into<String>) -> Self {
        Self::DedupFailure(msg.into())
    }

    pub fn encoding_overflow(msg: impl Into<String>) -> Self {
        Self::EncodingOverflow(msg.into())
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Whether a consumer could plausibly retry by constructing a fresh
    /// encoder (requires every entry source to be restartable).
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::Io(_) | StreamError::Cancelled(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            StreamError::SourceExhausted(_) => "source-exhausted",
            StreamError::SourceFailure(_) => "source-failure",
            StreamError::DedupFailure(_) => "dedup-failure",
            StreamError::EncodingOverflow(_) => "encoding-overflow",
            StreamError::Cancelled(_) => "cancelled",
            StreamError::Io(_) => "io",
        }
    }
}
