// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Name Deduplicator
//!
//! A stateful policy mapping the sequence of incoming ZIP entry names to a
//! sequence of pairwise-distinct output names. The [`ZipStreamEncoder`]
//! (infrastructure layer) consults it exactly once per entry, immediately
//! before writing that entry's local file header.
//!
//! [`ZipStreamEncoder`]: ../../../archstream/infrastructure/encoding/zip_stream_encoder/struct.ZipStreamEncoder.html
//!
//! Three policies ship here:
//!
//! - [`DefaultDeduplicator`], which splits a name into `(path, index,
//!   extension)` and probes `path (k).ext` until a free slot is found. It
//!   *absorbs* already-disambiguated names rather than colliding with them -
//!   see the module tests for the exact behavior.
//! - [`NoopDeduplicator`], which emits names verbatim and leaves uniqueness to
//!   the caller.
//! - any custom type implementing [`NameDeduplicator`].

use crate::error::StreamError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// A single-archive, stateful transducer from incoming entry names to unique
/// output names.
///
/// Implementations must be single-use: constructed once per archive, and
/// never polled concurrently (the encoder drives entries strictly in order,
/// so this is a non-issue for the shipped encoder, but custom implementations
/// should not assume otherwise).
pub trait NameDeduplicator: Send {
    /// Accepts the next incoming name and returns the name to write to the
    /// archive. Must never return the same string twice for the same
    /// deduplicator instance.
    fn accept(&mut self, name: &str) -> Result<String, StreamError>;
}

/// Splits a name into `(path, index, extension)` per the default naming
/// convention: the final `.ext` (if any) is the extension, and a `" (N)"`
/// immediately before it (or at the end, if there is no extension) is the
/// disambiguation index.
///
/// Matching is attempted with the extension present first, falling back to a
/// no-extension form; both try the indexed form before the bare form, so a
/// name like `"foo (3).txt"` splits to `("foo", Some(3), Some("txt"))` rather
/// than treating `" (3)"` as part of the path.
#[derive(Clone)]
pub struct NamePattern {
    with_ext: Regex,
    no_ext: Regex,
}

impl NamePattern {
    /// The convention described in §4.3 / §9 of the design: last dot is the
    /// extension, trailing `" (N)"` before it is the index.
    pub fn default_pattern() -> Self {
        DEFAULT_NAME_PATTERN.clone()
    }

    pub fn split(&self, name: &str) -> (String, Option<u64>, Option<String>) {
        if let Some(caps) = self.with_ext.captures(name) {
            let path = caps.name("path").unwrap().as_str().to_string();
            let index = caps.name("index").and_then(|m| m.as_str().parse::<u64>().ok());
            let ext = caps.name("ext").unwrap().as_str().to_string();
            return (path, index, Some(ext));
        }
        if let Some(caps) = self.no_ext.captures(name) {
            let path = caps.name("path").unwrap().as_str().to_string();
            let index = caps.name("index").and_then(|m| m.as_str().parse::<u64>().ok());
            return (path, index, None);
        }
        (name.to_string(), None, None)
    }
}

static DEFAULT_NAME_PATTERN: Lazy<NamePattern> = Lazy::new(|| NamePattern {
    with_ext: Regex::new(r"^(?P<path>.+?)(?: \((?P<index>\d+)\))?\.(?P<ext>[^./]+)$").unwrap(),
    no_ext: Regex::new(r"^(?P<path>.+?)(?: \((?P<index>\d+)\))?$").unwrap(),
});

/// `R(path, index, extension) -> name`. The default reconstructor renders
/// `path` + `" (k)"` when `k > 0` + `".ext"` when an extension is present.
///
/// `Arc`-wrapped (rather than `Box`) so a single reconstructor can be shared
/// by the per-archive factory returned from [`default_deduplicator`] without
/// needing to clone the closure itself.
pub type Reconstructor = std::sync::Arc<dyn Fn(&str, u64, Option<&str>) -> String + Send + Sync>;

pub fn default_reconstructor() -> Reconstructor {
    std::sync::Arc::new(|path: &str, index: u64, ext: Option<&str>| {
        let mut out = String::from(path);
        if index > 0 {
            out.push_str(&format!(" ({index})"));
        }
        if let Some(ext) = ext {
            out.push('.');
            out.push_str(ext);
        }
        out
    })
}

/// The default deduplication policy described in §4.3.
///
/// Maintains the set of already-emitted names and, per logical `path`, the
/// next disambiguation index to try. Index `0` always means "no suffix";
/// indices `k >= 1` mean `" (k)"` was appended.
pub struct DefaultDeduplicator {
    pattern: NamePattern,
    reconstructor: Reconstructor,
    emitted: HashSet<String>,
    next_index: HashMap<String, u64>,
}

impl DefaultDeduplicator {
    pub fn new(pattern: NamePattern, reconstructor: Reconstructor) -> Self {
        Self {
            pattern,
            reconstructor,
            emitted: HashSet::new(),
            next_index: HashMap::new(),
        }
    }
}

impl NameDeduplicator for DefaultDeduplicator {
    fn accept(&mut self, name: &str) -> Result<String, StreamError> {
        let (path, index_in, ext) = self.pattern.split(name);

        let bare = (self.reconstructor)(&path, 0, ext.as_deref());
        if !self.emitted.contains(&bare) {
            self.emitted.insert(bare.clone());
            return Ok(bare);
        }

        let stored = self.next_index.get(&path).copied().unwrap_or(1);
        let mut k = index_in.unwrap_or(1).max(stored).max(1);
        loop {
            let candidate = (self.reconstructor)(&path, k, ext.as_deref());
            if !self.emitted.contains(&candidate) {
                self.emitted.insert(candidate.clone());
                self.next_index.insert(path, k + 1);
                return Ok(candidate);
            }
            k += 1;
        }
    }
}

/// Instantiates a fresh [`DefaultDeduplicator`] for each archive, capturing
/// the pattern and reconstructor to use.
pub fn default_deduplicator(pattern: NamePattern, reconstructor: Reconstructor) -> impl Fn() -> DefaultDeduplicator {
    move || DefaultDeduplicator::new(pattern.clone(), reconstructor.clone())
}

/// Disabled deduplication: entries are emitted verbatim. Duplicate names
/// become the caller's responsibility; this type never rejects them.
pub struct NoopDeduplicator;

impl NameDeduplicator for NoopDeduplicator {
    fn accept(&mut self, name: &str) -> Result<String, StreamError> {
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_dedup() -> DefaultDeduplicator {
        DefaultDeduplicator::new(NamePattern::default_pattern(), default_reconstructor())
    }

    #[test]
    fn split_recognizes_extension_and_index() {
        let pattern = NamePattern::default_pattern();
        assert_eq!(
            pattern.split("foo.txt"),
            ("foo".to_string(), None, Some("txt".to_string()))
        );
        assert_eq!(
            pattern.split("foo (3).txt"),
            ("foo".to_string(), Some(3), Some("txt".to_string()))
        );
        assert_eq!(pattern.split("README"), ("README".to_string(), None, None));
        assert_eq!(
            pattern.split("README (2)"),
            ("README".to_string(), Some(2), None)
        );
        assert_eq!(
            pattern.split("dir/sub/foo.tar.gz"),
            ("dir/sub/foo.tar".to_string(), None, Some("gz".to_string()))
        );
    }

    #[test]
    fn uniqueness_across_repeated_plain_names() {
        let mut dedup = default_dedup();
        let out = vec!["a.txt", "a.txt", "a.txt"]
            .into_iter()
            .map(|n| dedup.accept(n).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(out, vec!["a.txt", "a (1).txt", "a (2).txt"]);
    }

    #[test]
    fn absorbs_already_disambiguated_name() {
        let mut dedup = default_dedup();
        let out = vec!["a.txt", "a (1).txt", "a.txt"]
            .into_iter()
            .map(|n| dedup.accept(n).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(out, vec!["a.txt", "a (1).txt", "a (2).txt"]);
    }

    #[test]
    fn distinct_names_pass_through_unchanged() {
        let mut dedup = default_dedup();
        assert_eq!(dedup.accept("a.txt").unwrap(), "a.txt");
        assert_eq!(dedup.accept("b.txt").unwrap(), "b.txt");
        assert_eq!(dedup.accept("c").unwrap(), "c");
    }

    #[test]
    fn noop_emits_verbatim_duplicates() {
        let mut dedup = NoopDeduplicator;
        assert_eq!(dedup.accept("a.txt").unwrap(), "a.txt");
        assert_eq!(dedup.accept("a.txt").unwrap(), "a.txt");
    }

    proptest::proptest! {
        /// §4.3's uniqueness guarantee: whatever sequence of incoming names a
        /// `DefaultDeduplicator` accepts, the names it emits are pairwise
        /// distinct.
        #[test]
        fn accept_always_emits_pairwise_distinct_names(
            names in proptest::collection::vec("[a-z]{1,4}(\\.[a-z]{1,3})?", 1..20)
        ) {
            let mut dedup = default_dedup();
            let mut seen = HashSet::new();
            for name in &names {
                let out = dedup.accept(name).unwrap();
                proptest::prop_assert!(seen.insert(out), "duplicate name emitted for input {:?}", names);
            }
        }
    }
}
