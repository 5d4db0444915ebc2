// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Compression methods recognized by the ZIP local/central headers this core
//! writes. Only the two methods every unzip implementation supports are
//! exposed; anything else belongs to a different, richer archive format.

/// The compression method recorded in a ZIP entry's local and central-
/// directory headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionMethod {
    /// Method 0: payload copied through unchanged.
    Stored,
    /// Method 8: raw DEFLATE, the default for this core.
    #[default]
    Deflate,
}

impl CompressionMethod {
    /// The two-byte method code stored in the ZIP record.
    pub fn code(self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
        }
    }
}
