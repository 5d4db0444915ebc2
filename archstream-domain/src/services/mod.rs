// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain services: the chunk-producing and name-policy ports that the
//! application and infrastructure layers compose into the ZIP stream encoder.

pub mod chunk_source;
pub mod name_deduplicator;
pub mod resource_stream;

pub use chunk_source::{BufferSource, ChunkSource, ChunkSourceStream};
pub use name_deduplicator::{
    default_deduplicator, default_reconstructor, DefaultDeduplicator, NameDeduplicator, NamePattern,
    NoopDeduplicator, Reconstructor,
};
pub use resource_stream::{resource_stream_function, ResourceStream};
