// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # archstream-domain
//!
//! The pure layer of the streaming composition core: value objects, entities,
//! and domain services with no dependency on an async runtime or a
//! compression backend.
//!
//! ## Core Concepts
//!
//! - [`services::chunk_source::ChunkSource`]: a lazy, forward-only producer of
//!   byte chunks - the one abstraction everything downstream builds on.
//! - [`services::resource_stream::ResourceStream`]: makes a chunk source
//!   restartable by wrapping a factory instead of a live producer.
//! - [`services::name_deduplicator::NameDeduplicator`]: the pluggable policy
//!   that turns a sequence of incoming entry names into pairwise-distinct
//!   output names.
//! - [`value_objects::zip_entry::ZipEntry`]: the `(name, source)` pair an
//!   archive is built from.
//! - [`entities::central_directory_record::CentralDirectoryRecord`]: the
//!   encoder's in-memory journal entry for one already-written archive
//!   member.

pub mod entities;
pub mod error;
pub mod services;
pub mod value_objects;

pub use entities::CentralDirectoryRecord;
pub use error::StreamError;
pub use services::{
    default_deduplicator, default_reconstructor, resource_stream_function, BufferSource, ChunkSource,
    ChunkSourceStream, DefaultDeduplicator, NameDeduplicator, NamePattern, NoopDeduplicator, Reconstructor,
    ResourceStream,
};
pub use value_objects::{zip_entry, CompressionMethod, ZipEntry};
