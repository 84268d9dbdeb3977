//! Reserve pool of unbound tweens, searched by kind tag.
//!
//! The reserve is one ordered list shared by every kind. Lookups scan from
//! the back, so the most recently returned tween of a kind is handed out
//! first. Per-kind counts are kept alongside so an optional retention cap can
//! be enforced without a scan.

use std::collections::HashMap;

use crate::core::{AnyTween, KindTag};
use crate::tlog_trace;

/// Pooled tweens waiting to be reused.
pub struct Reserve {
    /// Unbound tweens, oldest first.
    entries: Vec<Box<dyn AnyTween>>,
    /// Number of entries per kind.
    counts: HashMap<KindTag, usize>,
    /// Maximum entries retained per kind; extras are dropped.
    max_per_kind: Option<usize>,
}

impl Reserve {
    /// Create an empty reserve.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Initial capacity of the backing list
    /// * `max_per_kind` - Retention cap per kind (`None` keeps everything)
    pub fn new(capacity: usize, max_per_kind: Option<usize>) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            counts: HashMap::new(),
            max_per_kind,
        }
    }

    /// Return a tween to the pool.
    ///
    /// Returns `false` when the kind is already at its retention cap and the
    /// tween was dropped instead.
    pub fn put(&mut self, tween: Box<dyn AnyTween>) -> bool {
        let kind = tween.kind();
        let count = self.counts.entry(kind).or_insert(0);
        if self.max_per_kind.is_some_and(|max| *count >= max) {
            tlog_trace!(
                "reserve full for {:?}, dropping tween {}",
                kind,
                tween.id().short()
            );
            return false;
        }
        *count += 1;
        self.entries.push(tween);
        true
    }

    /// Take the most recently pooled tween of `kind`, if any.
    pub fn take(&mut self, kind: KindTag) -> Option<Box<dyn AnyTween>> {
        let index = self.entries.iter().rposition(|t| t.kind() == kind)?;
        if let Some(count) = self.counts.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
        Some(self.entries.remove(index))
    }

    /// Number of pooled tweens across all kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pooled tweens of `kind`.
    pub fn count_of(&self, kind: KindTag) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Iterate pooled tweens, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn AnyTween + 'static)> + '_ {
        self.entries.iter().map(|t| t.as_ref())
    }

    /// Drop every pooled tween.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counts.clear();
    }
}
