//! Fresh identifiers for edges and nodes that the text did not name.
//!
//! Ids are `<prefix>-<n>` where `n` comes from a counter seeded from the wall
//! clock. The counter only moves forward, so two ids from one generator never
//! collide; callers pass a `taken` predicate to also step over ids already
//! present in the diagram.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{EdgeId, NodeId, NodeKind};

/// Monotonic id source.
#[derive(Debug, Clone)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    /// Seed from the current time in milliseconds.
    #[must_use]
    pub fn from_clock() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX / 2));
        Self { next: millis }
    }

    /// Seed with a fixed value. Used where repeatable ids matter.
    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Take the next suffix.
    pub fn next_suffix(&mut self) -> u64 {
        let n = self.next;
        self.next = self.next.wrapping_add(1);
        n
    }

    /// Id for an edge between `source` and `target`: `edge-<source>-<target>-<n>`.
    pub fn edge_id(&mut self, source: &str, target: &str, taken: impl Fn(&str) -> bool) -> EdgeId {
        loop {
            let id = format!("edge-{source}-{target}-{}", self.next_suffix());
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Id for a node of `kind`: `<kind prefix>-<n>`.
    pub fn node_id(&mut self, kind: NodeKind, taken: impl Fn(&str) -> bool) -> NodeId {
        loop {
            let id = format!("{}-{}", kind.id_prefix(), self.next_suffix());
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl Default for IdGen {
    fn default() -> Self {
        Self::from_clock()
    }
}
