// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Thin consumer-facing aliases over the domain's resource-stream
//! constructors, named to match the core's external surface exactly:
//! `resource_stream` (direct constructor) alongside
//! [`archstream_domain::resource_stream_function`] (decorator form).

use archstream_domain::{ChunkSource, ResourceStream};

/// Direct constructor: captures `factory` and `args`, performing no work.
/// Equivalent to [`ResourceStream::wrap`], exposed under the name used in
/// the rest of the core's surface.
pub fn resource_stream<T, F, S>(factory: F, args: T) -> ResourceStream<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> S + Send + Sync + 'static,
    S: ChunkSource + Send + 'static,
{
    ResourceStream::wrap(factory, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archstream_domain::BufferSource;

    #[tokio::test]
    async fn resource_stream_wraps_without_running_the_factory() {
        let resource = resource_stream(|n: u8| BufferSource::new(vec![n; 2]), 9u8);
        let mut source = resource.iterate();
        assert_eq!(source.next_chunk().await.unwrap(), Some(vec![9, 9]));
    }
}
