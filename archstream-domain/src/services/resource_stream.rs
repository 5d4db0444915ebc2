// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Resource Stream
//!
//! A [`ResourceStream`] makes a [`ChunkSource`] restartable by capturing the
//! *recipe* for producing one - a factory plus its bound arguments - instead
//! of a live producer. Iterating the resource stream invokes the factory
//! fresh each time; nothing is shared between iterations.
//!
//! This is what lets an entry in a streamed ZIP archive be re-encoded after a
//! retry: the archive encoder itself can be wrapped the same way (see
//! `zip_stream_resource` in the application layer), but that only produces a
//! byte-identical archive the second time around if every entry's source is,
//! in turn, a resource stream.

use crate::error::StreamError;
use crate::services::chunk_source::ChunkSource;
use async_trait::async_trait;
use std::sync::Arc;

type Factory<T> = Arc<dyn Fn(T) -> Box<dyn ChunkSource> + Send + Sync>;

/// Wraps a factory and its bound arguments so a fresh [`ChunkSource`] can be
/// produced on demand.
///
/// Constructing a `ResourceStream` performs no work: the factory is not
/// invoked until [`ResourceStream::iterate`] is called, or until the stream
/// is itself driven as a `ChunkSource` via [`ChunkSource::next_chunk`].
pub struct ResourceStream<T> {
    factory: Factory<T>,
    args: T,
    active: Option<Box<dyn ChunkSource>>,
}

impl<T: Clone + Send + Sync + 'static> ResourceStream<T> {
    /// Captures `factory` and `args`, performing no work.
    pub fn wrap<F, S>(factory: F, args: T) -> Self
    where
        F: Fn(T) -> S + Send + Sync + 'static,
        S: ChunkSource + Send + 'static,
    {
        let factory: Factory<T> = Arc::new(move |args| Box::new(factory(args)) as Box<dyn ChunkSource>);
        Self {
            factory,
            args,
            active: None,
        }
    }

    /// Produces a fresh, independent chunk source by invoking the captured
    /// factory with the captured arguments. Each call starts a brand new
    /// producer; nothing is shared with any previous iteration.
    pub fn iterate(&self) -> Box<dyn ChunkSource> {
        (self.factory)(self.args.clone())
    }
}

impl<T: Clone> Clone for ResourceStream<T> {
    /// Cloning a resource stream copies the recipe, not any in-progress
    /// iteration - the clone starts fresh on its first `next_chunk` call.
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            args: self.args.clone(),
            active: None,
        }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> ChunkSource for ResourceStream<T> {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.active.is_none() {
            self.active = Some(self.iterate());
        }
        self.active.as_mut().unwrap().next_chunk().await
    }
}

/// Decorator-style adapter: given a chunk-producing factory, returns a
/// callable with the same parameter shape that, instead of starting the
/// producer immediately, returns a [`ResourceStream`] carrying `(factory,
/// args)`. Call-site syntax at the factory is unchanged; only the return
/// type becomes restartable.
pub fn resource_stream_function<T, F, S>(factory: F) -> impl Fn(T) -> ResourceStream<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> S + Send + Sync + Clone + 'static,
    S: ChunkSource + Send + 'static,
{
    move |args: T| ResourceStream::wrap(factory.clone(), args)
}
