// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod deflate;
pub mod zip_layout;
pub mod zip_stream_encoder;

pub use zip_stream_encoder::ZipStreamEncoder;
