// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod compression_method;
pub mod zip_entry;

pub use compression_method::CompressionMethod;
pub use zip_entry::{zip_entry, ZipEntry};
