use crate::automaton::SealedAutomaton;
use crate::refrain::Refrain;
use crate::tree::SealedTree;
use std::hash::Hash;

/// Queries answered by a sealed substring index.
///
/// Implemented by both construction strategies; they agree on every answer,
/// including tie-breaks in [`dominant_repeat`](SubstringIndex::dominant_repeat).
pub trait SubstringIndex<T> {
    /// Length of the indexed text.
    fn text_len(&self) -> usize;

    /// Number of nodes the index allocated.
    fn node_count(&self) -> usize;

    /// Returns true if `pattern` is a substring of the text.
    fn contains(&self, pattern: &[T]) -> bool;

    /// Counts occurrences of `pattern`, overlaps included.
    fn occurrences(&self, pattern: &[T]) -> usize;

    /// Finds the substring maximizing `length * occurrences`.
    fn dominant_repeat(&self) -> Refrain<T>;
}

impl<T: Copy + Eq + Hash> SubstringIndex<T> for SealedAutomaton<T> {
    fn text_len(&self) -> usize {
        self.len()
    }

    fn node_count(&self) -> usize {
        SealedAutomaton::node_count(self)
    }

    fn contains(&self, pattern: &[T]) -> bool {
        SealedAutomaton::contains(self, pattern)
    }

    fn occurrences(&self, pattern: &[T]) -> usize {
        SealedAutomaton::occurrences(self, pattern)
    }

    fn dominant_repeat(&self) -> Refrain<T> {
        SealedAutomaton::dominant_repeat(self)
    }
}

impl<T: Copy + Eq + Hash> SubstringIndex<T> for SealedTree<T> {
    fn text_len(&self) -> usize {
        self.len()
    }

    fn node_count(&self) -> usize {
        SealedTree::node_count(self)
    }

    fn contains(&self, pattern: &[T]) -> bool {
        SealedTree::contains(self, pattern)
    }

    fn occurrences(&self, pattern: &[T]) -> usize {
        SealedTree::occurrences(self, pattern)
    }

    fn dominant_repeat(&self) -> Refrain<T> {
        SealedTree::dominant_repeat(self)
    }
}

/// Construction strategy for [`build_index_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Suffix automaton with state cloning.
    #[default]
    Automaton,
    /// Suffix tree with lazily computed suffix links.
    Tree,
}

/// Builds and seals the default index (a suffix automaton) over `text`.
pub fn build_index<T, I>(text: I) -> SealedAutomaton<T>
where
    T: Copy + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    SealedAutomaton::build(text)
}

/// Builds and seals an index over `text` using `strategy`.
pub fn build_index_with<T, I>(strategy: Strategy, text: I) -> Box<dyn SubstringIndex<T>>
where
    T: Copy + Eq + Hash + 'static,
    I: IntoIterator<Item = T>,
{
    match strategy {
        Strategy::Automaton => Box::new(SealedAutomaton::build(text)),
        Strategy::Tree => Box::new(SealedTree::build(text)),
    }
}
