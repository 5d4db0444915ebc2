// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # ZIP Entry Descriptor
//!
//! A `(name, source)` pair contributing one local file header, payload, and
//! data descriptor to a streamed archive. An entry carries no precomputed
//! size or CRC - both are computed while the encoder streams its source.

use crate::services::chunk_source::ChunkSource;

/// A named, not-yet-encoded archive entry.
///
/// Constructing an entry performs no I/O: the source is only driven once the
/// encoder reaches this entry's turn.
pub struct ZipEntry {
    name: String,
    source: Box<dyn ChunkSource>,
}

impl ZipEntry {
    pub fn new(name: impl Into<String>, source: impl ChunkSource + 'static) -> Self {
        Self {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes the descriptor, handing ownership of the name and source to
    /// the caller (the encoder, mid-stream).
    pub fn into_parts(self) -> (String, Box<dyn ChunkSource>) {
        (self.name, self.source)
    }
}

/// Value constructor mirroring the external `zip_entry(name, source)` surface
/// named in the design overview.
pub fn zip_entry(name: impl Into<String>, source: impl ChunkSource + 'static) -> ZipEntry {
    ZipEntry::new(name, source)
}
