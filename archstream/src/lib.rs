// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # archstream
//!
//! Streaming ZIP archive composition: restartable chunk sources, a pluggable
//! name deduplicator, and a ZIP encoder that never buffers a whole entry.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Application Layer               │
//! │  zip_stream, zip_stream_resource, resource_  │
//! │  stream - composition only, no byte layout   │
//! └─────────────────────────────────────────────┘
//!                       │
//! ┌─────────────────────────────────────────────┐
//! │                Domain Layer                   │
//! │  ChunkSource, ResourceStream, NameDeduplicator│
//! │  (archstream-domain)                          │
//! └─────────────────────────────────────────────┘
//!                       ▲
//!                       │
//! ┌─────────────────────────────────────────────┐
//! │            Infrastructure Layer               │
//! │  ZipStreamEncoder, zip byte layout, deflate,  │
//! │  file-backed chunk sources                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use archstream::{zip_entry, zip_stream, DeduplicationPolicy};
//! use archstream_domain::{BufferSource, ChunkSource};
//! use archstream_domain::value_objects::CompressionMethod;
//!
//! let entries = vec![zip_entry("a.txt", BufferSource::new(b"hi".to_vec()))];
//! let mut archive = zip_stream(entries, DeduplicationPolicy::default(), CompressionMethod::Deflate);
//! // archive.next_chunk().await ...
//! ```

pub mod application;
pub mod infrastructure;

pub use application::use_cases::{resource_stream, zip_stream, zip_stream_resource, DeduplicationPolicy, RestartableEntry};
pub use archstream_domain::value_objects::zip_entry;
pub use archstream_domain::{default_deduplicator, resource_stream_function};
pub use infrastructure::ZipStreamEncoder;
