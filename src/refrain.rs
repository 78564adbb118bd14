use crate::node::NodeKey;
use std::cmp::Ordering;

/// The substring maximizing `length * occurrences` over all distinct
/// substrings of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refrain<T> {
    /// The substring, in text order.
    pub symbols: Vec<T>,
    /// Number of (possibly overlapping) occurrences in the text.
    pub occurrences: usize,
    /// `symbols.len() * occurrences`.
    pub value: usize,
}

impl<T> Refrain<T> {
    /// The answer for an empty text.
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            occurrences: 0,
            value: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// One node's bid for the dominant repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub node: NodeKey,
    pub length: usize,
    pub occurrences: usize,
    /// Start offset of the first occurrence.
    pub first_start: usize,
}

impl Candidate {
    #[inline]
    pub(crate) fn value(&self) -> usize {
        self.length * self.occurrences
    }

    /// Ranks candidates: higher value, then shorter, then earlier first occurrence.
    ///
    /// `Greater` means `self` is preferred. Distinct substrings never compare
    /// `Equal`, so the winner does not depend on visiting order.
    pub(crate) fn rank(&self, other: &Candidate) -> Ordering {
        self.value()
            .cmp(&other.value())
            .then_with(|| other.length.cmp(&self.length))
            .then_with(|| other.first_start.cmp(&self.first_start))
    }
}

/// Picks the preferred candidate, ignoring empty strings.
pub(crate) fn select<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .filter(|c| c.length > 0 && c.occurrences > 0)
        .fold(None, |best: Option<Candidate>, c| match best {
            Some(b) if b.rank(&c) != Ordering::Less => Some(b),
            _ => Some(c),
        })
}
