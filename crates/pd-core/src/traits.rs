//! Trait sets and the palette they are drawn from.
//!
//! A trait is an index into the active [`Palette`]; an agent's traits are a
//! [`TraitSet`], a 32-bit bitset.  Set algebra (intersection, difference) is
//! a single bitwise op, and a set can never contain duplicates.

use std::fmt;
use std::sync::Arc;

use crate::{PdError, PdResult, TraitId};

/// Upper bound on palette length imposed by the `u32` bitset.
pub const MAX_PALETTE_LEN: usize = 32;

/// Trait counts above this still work but are hard to read off a rendering.
pub const TRAIT_WARNING_THRESHOLD: usize = 5;

/// The 26 shell colors of the reference application.
pub const DEFAULT_LABELS: [&str; 26] = [
    "#DC143C", "#FF7F50", "#FF8C00", "#FFD700", "#9ACD32", "#00FA9A", "#008080",
    "#00FFFF", "#00BFFF", "#0000CD", "#BA55D3", "#EE82EE", "#FF00FF", "#FFB6C1",
    "#FF1493", "#B0C4DE", "#778899", "#708090", "#2F4F4F", "#7FFFD4", "#F0FFFF",
    "#F5F5DC", "#FFE4C4", "#FFEBCD", "#F5DEB3", "#DEB887",
];

// ── TraitSet ──────────────────────────────────────────────────────────────────

/// Unordered set of [`TraitId`]s, stored as a bitmask.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitSet(pub u32);

impl TraitSet {
    pub const EMPTY: TraitSet = TraitSet(0);

    #[inline]
    fn bit(t: TraitId) -> u32 {
        debug_assert!(t.index() < MAX_PALETTE_LEN, "trait {t} out of bitset range");
        1u32 << t.0
    }

    #[inline]
    pub fn contains(self, t: TraitId) -> bool {
        self.0 & Self::bit(t) != 0
    }

    /// Insert `t`; returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, t: TraitId) -> bool {
        let had = self.contains(t);
        self.0 |= Self::bit(t);
        !had
    }

    /// Remove `t`; returns `false` if it was absent.
    #[inline]
    pub fn remove(&mut self, t: TraitId) -> bool {
        let had = self.contains(t);
        self.0 &= !Self::bit(t);
        had
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn intersection(self, other: TraitSet) -> TraitSet {
        TraitSet(self.0 & other.0)
    }

    #[inline]
    pub fn union(self, other: TraitSet) -> TraitSet {
        TraitSet(self.0 | other.0)
    }

    /// Traits in `self` that are not in `other`.
    #[inline]
    pub fn difference(self, other: TraitSet) -> TraitSet {
        TraitSet(self.0 & !other.0)
    }

    /// Members in ascending id order.
    pub fn iter(self) -> impl Iterator<Item = TraitId> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let low = bits.trailing_zeros();
            bits &= bits - 1;
            Some(TraitId(low as u8))
        })
    }

    /// The `n`-th member in ascending id order.
    pub fn nth(self, n: usize) -> Option<TraitId> {
        self.iter().nth(n)
    }
}

impl FromIterator<TraitId> for TraitSet {
    fn from_iter<I: IntoIterator<Item = TraitId>>(iter: I) -> Self {
        let mut set = TraitSet::EMPTY;
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl fmt::Debug for TraitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|t| t.0)).finish()
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// Ordered list of distinguishable trait labels.
///
/// Cheap to clone (labels live behind an `Arc`) so every snapshot can carry
/// the palette it should be read with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    labels: Arc<[String]>,
}

impl Palette {
    /// Build a palette from custom labels.
    ///
    /// Labels must be non-empty in number, at most [`MAX_PALETTE_LEN`], and
    /// pairwise distinct.
    pub fn new<I, S>(labels: I) -> PdResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(PdError::InvalidParameter("palette is empty".into()));
        }
        if labels.len() > MAX_PALETTE_LEN {
            return Err(PdError::InvalidParameter(format!(
                "palette has {} labels; at most {MAX_PALETTE_LEN} are supported",
                labels.len()
            )));
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(PdError::InvalidParameter(format!(
                    "palette label {label:?} appears more than once"
                )));
            }
        }
        Ok(Self { labels: labels.into() })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, t: TraitId) -> Option<&str> {
        self.labels.get(t.index()).map(String::as_str)
    }

    pub fn id_of(&self, label: &str) -> Option<TraitId> {
        self.labels.iter().position(|l| l == label).map(|i| TraitId(i as u8))
    }

    /// Labels of every member of `set`, in ascending id order.
    pub fn labels_of(&self, set: TraitSet) -> Vec<&str> {
        set.iter().filter_map(|t| self.label(t)).collect()
    }

    /// Look up a set by its labels; `None` if any label is unknown.
    pub fn set_of<'a, I>(&self, labels: I) -> Option<TraitSet>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().map(|l| self.id_of(l)).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
