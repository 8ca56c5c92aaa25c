//! Filter, rank and partition project records.
//!
//! # Invariants
//! - Only `published == Some(false)` removes a record.
//! - Ranking is `date` descending; undated records rank after every dated
//!   one. The sort is stable, so ties keep catalog order.
//! - `featured ∪ secondary ∪ remainder` equals the ranked feed exactly.

use crate::model::project::ProjectRecord;
use std::cmp::Reverse;

/// Records shown beside the featured slot.
pub const SECONDARY_SLOTS: usize = 2;

/// Fixed-role split of a ranked feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<T> {
    pub featured: Option<T>,
    /// At most `SECONDARY_SLOTS` items, rank order.
    pub secondary: Vec<T>,
    pub remainder: Vec<T>,
}

impl<T> Partition<T> {
    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.secondary.is_empty() && self.remainder.is_empty()
    }

    pub fn len(&self) -> usize {
        usize::from(self.featured.is_some()) + self.secondary.len() + self.remainder.len()
    }

    /// Iterates every item in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.featured
            .iter()
            .chain(self.secondary.iter())
            .chain(self.remainder.iter())
    }

    /// Maps every slot, keeping positions.
    pub fn map<U, F>(self, mut f: F) -> Partition<U>
    where
        F: FnMut(T) -> U,
    {
        Partition {
            featured: self.featured.map(&mut f),
            secondary: self.secondary.into_iter().map(&mut f).collect(),
            remainder: self.remainder.into_iter().map(&mut f).collect(),
        }
    }
}

/// Pure feed assembly over a catalog snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedAssembler;

impl FeedAssembler {
    /// Drops unpublished records and ranks the rest by recency.
    pub fn rank(records: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
        let mut ranked: Vec<ProjectRecord> =
            records.into_iter().filter(ProjectRecord::is_visible).collect();
        // `None < Some(_)`, so undated records land last under `Reverse`.
        ranked.sort_by_key(|record| Reverse(record.date));
        ranked
    }

    /// Splits a ranked feed into featured, secondary and remainder slots.
    pub fn partition<T>(ranked: Vec<T>) -> Partition<T> {
        let mut items = ranked.into_iter();
        let featured = items.next();
        let secondary = items.by_ref().take(SECONDARY_SLOTS).collect();
        let remainder = items.collect();
        Partition {
            featured,
            secondary,
            remainder,
        }
    }

    /// Ranks then partitions in one step.
    pub fn assemble(records: Vec<ProjectRecord>) -> Partition<ProjectRecord> {
        Self::partition(Self::rank(records))
    }
}
