// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Source
//!
//! `ChunkSource` is the one abstraction the rest of the streaming core is
//! built on: a lazy, finite, forward-only producer of byte chunks. Everything
//! downstream - the resource stream wrapper, a ZIP entry's payload, the ZIP
//! encoder itself - is ultimately just another `ChunkSource`.
//!
//! ## Design Principles
//!
//! - **Pull, not push**: a consumer drives the source by calling
//!   [`ChunkSource::next_chunk`] exactly when it is ready for more bytes.
//!   There is no internal buffering or read-ahead.
//! - **Consumed at most once**: after `next_chunk` returns `Ok(None)` (end of
//!   stream) or `Err` (failure), the source must not be polled again. This is
//!   a caller contract, not something the trait can enforce; see
//!   [`crate::services::resource_stream::ResourceStream`] for the one type
//!   that is restartable by construction.
//! - **I/O is an infrastructure port**: this trait is declared `async` via
//!   `async-trait` so implementations can await a socket, a file handle, or a
//!   `tokio::sync::mpsc::Receiver` without the domain layer depending on any
//!   particular runtime.

use crate::error::StreamError;
use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A lazy, finite, forward-only producer of byte chunks.
///
/// Chunks may be any size, including zero-length; consumers must pass
/// zero-length chunks through rather than dropping them; a zero-length chunk
/// is not itself end-of-stream.
#[async_trait]
pub trait ChunkSource: Send {
    /// Pulls the next chunk.
    ///
    /// Returns `Ok(Some(bytes))` for a chunk, `Ok(None)` once the source is
    /// exhausted, or `Err` if the underlying producer failed. A failure must
    /// be propagated verbatim by callers, never translated into a different
    /// error kind.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError>;
}

#[async_trait]
impl ChunkSource for Box<dyn ChunkSource> {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        (**self).next_chunk().await
    }
}

/// A [`ChunkSource`] that yields a single in-memory buffer and then ends.
///
/// This is the adapter for the simplest case in §4.1: "a fully-buffered byte
/// string (single chunk then End)". Re-polling after the buffer has been
/// taken returns `Ok(None)` rather than erroring, since there is no external
/// resource to report exhaustion against.
pub struct BufferSource {
    data: Option<Vec<u8>>,
}

impl BufferSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data: Some(data) }
    }
}

#[async_trait]
impl ChunkSource for BufferSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        Ok(self.data.take())
    }
}

/// Adapts any [`ChunkSource`] into a [`futures::Stream`] so it can be handed
/// directly to consumers that expect a request body stream (an external
/// collaborator outside this core's scope).
pub struct ChunkSourceStream<S> {
    inner: Option<S>,
    // Boxed so `poll_next` does not need `S: Unpin`.
    pending: Option<Pin<Box<dyn std::future::Future<Output = (S, Result<Option<Vec<u8>>, StreamError>)> + Send>>>,
}

impl<S: ChunkSource + Send + 'static> ChunkSourceStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Some(source),
            pending: None,
        }
    }
}

impl<S: ChunkSource + Send + Unpin + 'static> Stream for ChunkSourceStream<S> {
    type Item = Result<Vec<u8>, StreamError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.pending.is_none() {
            let mut source = match self.inner.take() {
                Some(source) => source,
                None => return Poll::Ready(None),
            };
            self.pending = Some(Box::pin(async move {
                let result = source.next_chunk().await;
                (source, result)
            }));
        }

        let fut = self.pending.as_mut().unwrap();
        match fut.as_mut().poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready((source, result)) => {
                self.pending = None;
                match result {
                    Ok(Some(chunk)) => {
                        self.inner = Some(source);
                        Poll::Ready(Some(Ok(chunk)))
                    }
                    Ok(None) => Poll::Ready(None),
                    Err(e) => Poll::Ready(Some(Err(e))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn buffer_source_yields_once_then_ends() {
        let mut source = BufferSource::new(b"hello".to_vec());
        assert_eq!(source.next_chunk().await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(source.next_chunk().await.unwrap(), None);
        assert_eq!(source.next_chunk().await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_buffer_is_a_single_empty_chunk_then_end() {
        let mut source = BufferSource::new(Vec::new());
        assert_eq!(source.next_chunk().await.unwrap(), Some(Vec::new()));
        assert_eq!(source.next_chunk().await.unwrap(), None);
    }
}
