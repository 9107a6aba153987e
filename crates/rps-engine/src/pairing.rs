//! Canonical pair keys
//!
//! A match belongs to an unordered pair of participants. Both orderings of
//! the pair collapse onto one key with the lower identity first, so the
//! record is shared instead of mirrored.

use serde::{Deserialize, Serialize};

/// Slot of the lower identity in a pair
pub const LOW_SLOT: usize = 0;
/// Slot of the higher identity in a pair
pub const HIGH_SLOT: usize = 1;

/// Ordering-independent key for two distinct participants
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey<Id> {
    low: Id,
    high: Id,
}

impl<Id: Ord> PairKey<Id> {
    /// Build the key for `a` and `b`, in either order.
    ///
    /// Returns `None` when both sides are the same participant.
    pub fn new(a: Id, b: Id) -> Option<Self> {
        match a.cmp(&b) {
            core::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            core::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            core::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> &Id {
        &self.low
    }

    pub fn high(&self) -> &Id {
        &self.high
    }

    /// Storage slot of `id` within the pair
    pub fn slot_of(&self, id: &Id) -> Option<usize> {
        if *id == self.low {
            Some(LOW_SLOT)
        } else if *id == self.high {
            Some(HIGH_SLOT)
        } else {
            None
        }
    }

    /// Identity stored at `slot`
    pub fn member(&self, slot: usize) -> &Id {
        if slot == LOW_SLOT {
            &self.low
        } else {
            &self.high
        }
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.slot_of(id).is_some()
    }
}

/// Order two identities lower-first. Hosts use this to derive storage
/// addresses without building a key.
pub fn canonical_order<Id: Ord>(a: Id, b: Id) -> (Id, Id) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
