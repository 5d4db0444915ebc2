// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Zip Stream Use Cases
//!
//! The consumer-facing constructors that wire the domain's chunk-source and
//! deduplication services into the infrastructure layer's
//! [`ZipStreamEncoder`]: `zip_stream` and its restartable sibling
//! `zip_stream_resource`. This is orchestration only - no byte layout, no
//! compression - which is why it lives in the application layer rather than
//! infrastructure.

use crate::infrastructure::encoding::ZipStreamEncoder;
use archstream_domain::value_objects::CompressionMethod;
use archstream_domain::{ChunkSource, NameDeduplicator, NoopDeduplicator, ResourceStream, StreamError, ZipEntry};
use std::sync::Arc;

/// Deduplication policy selected when building an archive.
pub enum DeduplicationPolicy {
    /// Use the supplied factory to build a fresh deduplicator for this
    /// archive (see [`archstream_domain::default_deduplicator`]).
    Factory(Arc<dyn Fn() -> Box<dyn NameDeduplicator> + Send + Sync>),
    /// Disabled: entries are emitted verbatim.
    None,
}

impl DeduplicationPolicy {
    fn build(&self) -> Box<dyn NameDeduplicator> {
        match self {
            DeduplicationPolicy::Factory(factory) => factory(),
            DeduplicationPolicy::None => Box::new(NoopDeduplicator),
        }
    }
}

impl Default for DeduplicationPolicy {
    /// The default policy configured archive-wide: `DefaultDeduplicator`
    /// with the default name pattern and reconstructor.
    fn default() -> Self {
        DeduplicationPolicy::Factory(Arc::new(|| {
            Box::new(archstream_domain::DefaultDeduplicator::new(
                archstream_domain::NamePattern::default_pattern(),
                archstream_domain::default_reconstructor(),
            ))
        }))
    }
}

/// Builds a streaming ZIP archive over `entries`, returning it as a
/// [`ChunkSource`]. Constructing the returned value performs no I/O; nothing
/// is pulled from any entry's source until the consumer calls
/// [`ChunkSource::next_chunk`].
pub fn zip_stream(
    entries: Vec<ZipEntry>,
    deduplicator: DeduplicationPolicy,
    compression: CompressionMethod,
) -> impl ChunkSource {
    ZipStreamEncoder::new(entries, deduplicator.build(), compression)
}

/// One entry of a [`zip_stream_resource`] archive: a name paired with a
/// factory that produces a fresh chunk source on demand. For the resulting
/// resource stream to be usefully restartable, `recreate_source` must itself
/// produce an independent, from-scratch source on every call.
#[derive(Clone)]
pub struct RestartableEntry {
    name: String,
    recreate_source: Arc<dyn Fn() -> Box<dyn ChunkSource> + Send + Sync>,
}

impl RestartableEntry {
    pub fn new(
        name: impl Into<String>,
        recreate_source: impl Fn() -> Box<dyn ChunkSource> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            recreate_source: Arc::new(recreate_source),
        }
    }

    fn materialize(&self) -> ZipEntry {
        ZipEntry::new(self.name.clone(), BoxedSource::new(self.recreate_source.clone()))
    }
}

/// Adapts `Arc<dyn Fn() -> Box<dyn ChunkSource>>` into a [`ChunkSource`] by
/// invoking it exactly once, lazily, on the first pull, then delegating
/// every subsequent pull to that same instance - matching
/// [`ResourceStream`]'s `active` pattern rather than re-invoking the factory
/// on every call (which would hand back a fresh, never-exhausted source
/// forever).
struct BoxedSource {
    recreate_source: Arc<dyn Fn() -> Box<dyn ChunkSource> + Send + Sync>,
    active: Option<Box<dyn ChunkSource>>,
}

impl BoxedSource {
    fn new(recreate_source: Arc<dyn Fn() -> Box<dyn ChunkSource> + Send + Sync>) -> Self {
        Self {
            recreate_source,
            active: None,
        }
    }
}

#[async_trait::async_trait]
impl ChunkSource for BoxedSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.active.is_none() {
            self.active = Some((self.recreate_source)());
        }
        self.active.as_mut().unwrap().next_chunk().await
    }
}

/// Builds a [`ResourceStream`] whose factory re-creates a fresh
/// [`ZipStreamEncoder`] from `entries` on every iteration. Each entry's
/// `recreate_source` closure is invoked once per entry per archive
/// iteration, so a second `iterate()` re-drives every entry from scratch -
/// a restartable archive built from the encoder's Resource Stream wrapper.
pub fn zip_stream_resource(
    entries: Vec<RestartableEntry>,
    compression: CompressionMethod,
) -> ResourceStream<Vec<RestartableEntry>> {
    ResourceStream::wrap(
        move |entries: Vec<RestartableEntry>| {
            let materialized = entries.iter().map(RestartableEntry::materialize).collect();
            zip_stream(materialized, DeduplicationPolicy::default(), compression)
        },
        entries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use archstream_domain::BufferSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn zip_stream_resource_re_drives_every_entry_on_restart() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_for_entry = calls.clone();
        let entry = RestartableEntry::new("a.txt", move || {
            calls_for_entry.fetch_add(1, Ordering::SeqCst);
            Box::new(BufferSource::new(b"payload".to_vec()))
        });

        let resource = zip_stream_resource(vec![entry], CompressionMethod::Stored);

        async fn drain(mut source: impl ChunkSource) -> Vec<u8> {
            let mut out = Vec::new();
            while let Some(chunk) = source.next_chunk().await.unwrap() {
                out.extend(chunk);
            }
            out
        }

        let first = drain(resource.iterate()).await;
        let second = drain(resource.iterate()).await;
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
