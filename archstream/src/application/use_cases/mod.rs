// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod resource;
pub mod zip_stream;

pub use resource::resource_stream;
pub use zip_stream::{zip_stream, zip_stream_resource, DeduplicationPolicy, RestartableEntry};
