use crate::counter;
use crate::node::{NodeKey, State};
use crate::refrain::{self, Candidate, Refrain};
use crate::traversal::{self, TransitionGraph};
use slotmap::SlotMap;
use std::hash::Hash;

/// Online suffix automaton over a growing text.
///
/// Each state is an end-position equivalence class of substrings. A text of
/// `n >= 1` symbols produces at most `2n` states.
pub struct SuffixAutomaton<T> {
    pub(crate) states: SlotMap<NodeKey, State<T>>,

    pub(crate) root: NodeKey,

    /// State of the whole text seen so far.
    last: NodeKey,

    /// Number of symbols appended
    length: usize,
}

impl<T: Copy + Eq + Hash> SuffixAutomaton<T> {
    /// Creates an automaton for the empty text.
    pub fn new() -> Self {
        let mut states = SlotMap::with_key();
        let root = states.insert(State::root());

        Self {
            states,
            root,
            last: root,
            length: 0,
        }
    }

    /// Appends one symbol to the text.
    pub fn push(&mut self, symbol: T) {
        let position = self.length;
        self.length += 1;

        let last = self.last;
        let cur = self.states.insert(State::new(
            self.states[last].length + 1,
            last,
            symbol,
            position,
        ));

        // Every suffix lacking a transition on `symbol` now extends to `cur`
        let mut walk = Some(last);
        while let Some(q) = walk {
            if self.states[q].can_transition(symbol) {
                break;
            }
            self.states[q].transitions.insert(symbol, cur);
            walk = self.states[q].link;
        }

        match walk {
            None => self.states[cur].link = Some(self.root),
            Some(q) => {
                let p = self.states[q].transitions[&symbol];
                if self.states[p].length == self.states[q].length + 1 {
                    self.states[cur].link = Some(p);
                } else {
                    self.split_class(q, p, cur, symbol);
                }
            }
        }

        self.last = cur;
    }

    /// Separates the prefix of `p`'s class that `q` reaches on `symbol`.
    fn split_class(&mut self, q: NodeKey, p: NodeKey, cur: NodeKey, symbol: T) {
        let length = self.states[q].length + 1;
        let copy = self.states[p].clone_as(length, q, symbol);
        let clone = self.states.insert(copy);

        self.states[p].link = Some(clone);
        self.states[cur].link = Some(clone);

        let mut walk = Some(q);
        while let Some(r) = walk {
            match self.states[r].transitions.get_mut(&symbol) {
                Some(target) if *target == p => *target = clone,
                _ => break,
            }
            walk = self.states[r].link;
        }

        tracing::trace!(length, "cloned automaton state");
    }

    /// Appends every symbol in order.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for symbol in iter {
            self.push(symbol);
        }
    }

    /// Returns the number of symbols appended.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of states, root included.
    pub fn node_count(&self) -> usize {
        self.states.len()
    }

    /// Returns true if `pattern` occurs in the text appended so far.
    pub fn contains(&self, pattern: &[T]) -> bool {
        self.walk(pattern).is_some()
    }

    /// Follows transitions from the root, one per symbol of `pattern`.
    pub(crate) fn walk(&self, pattern: &[T]) -> Option<NodeKey> {
        pattern
            .iter()
            .try_fold(self.root, |state, &symbol| self.states[state].transition(symbol))
    }

    /// Spells the longest string of `key`, in text order.
    pub(crate) fn reconstruct(&self, key: NodeKey) -> Vec<T> {
        let mut symbols = Vec::with_capacity(self.states[key].length);
        let mut current = key;
        while let Some((parent, symbol)) = self.states[current].parent {
            symbols.push(symbol);
            current = parent;
        }
        symbols.reverse();
        symbols
    }

    /// Marks terminal states and counts occurrences.
    ///
    /// Consumes the builder: counts are only meaningful for a finished text.
    pub fn seal(mut self) -> SealedAutomaton<T> {
        let mut terminal = Some(self.last);
        while let Some(key) = terminal {
            self.states[key].terminal = true;
            terminal = self.states[key].link;
        }

        counter::count_occurrences(&mut self);

        tracing::debug!(
            text_len = self.length,
            states = self.states.len(),
            "sealed suffix automaton"
        );

        SealedAutomaton { inner: self }
    }
}

impl<T: Copy + Eq + Hash> TransitionGraph for SuffixAutomaton<T> {
    fn root(&self) -> NodeKey {
        self.root
    }

    fn successors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.states[key].transitions.values().copied()
    }
}

impl<T: Copy + Eq + Hash> Default for SuffixAutomaton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> FromIterator<T> for SuffixAutomaton<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut automaton = Self::new();
        automaton.extend(iter);
        automaton
    }
}

/// A finished suffix automaton with occurrence counts.
pub struct SealedAutomaton<T> {
    pub(crate) inner: SuffixAutomaton<T>,
}

impl<T: Copy + Eq + Hash> SealedAutomaton<T> {
    /// Builds and seals an automaton for `text`.
    pub fn build<I: IntoIterator<Item = T>>(text: I) -> Self {
        text.into_iter().collect::<SuffixAutomaton<T>>().seal()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn contains(&self, pattern: &[T]) -> bool {
        self.inner.contains(pattern)
    }

    /// Returns how many times `pattern` occurs, overlaps included.
    ///
    /// The empty pattern occurs `len() + 1` times.
    pub fn occurrences(&self, pattern: &[T]) -> usize {
        self.inner
            .walk(pattern)
            .map_or(0, |state| self.inner.states[state].count)
    }

    /// Finds the substring maximizing `length * occurrences`.
    ///
    /// Ties go to the shorter substring, then to the earlier first occurrence.
    pub fn dominant_repeat(&self) -> Refrain<T> {
        let states = &self.inner.states;
        let best = refrain::select(traversal::post_order(&self.inner).into_iter().map(|key| {
            let state = &states[key];
            Candidate {
                node: key,
                length: state.length,
                occurrences: state.count,
                first_start: state.first_end + 1 - state.length,
            }
        }));

        let Some(best) = best else {
            return Refrain::empty();
        };

        tracing::debug!(
            length = best.length,
            occurrences = best.occurrences,
            value = best.value(),
            "found dominant repeat"
        );

        Refrain {
            symbols: self.inner.reconstruct(best.node),
            occurrences: best.occurrences,
            value: best.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn automaton(text: &str) -> SuffixAutomaton<char> {
        text.chars().collect()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_new() {
        let aut = SuffixAutomaton::<char>::new();
        assert_eq!(aut.len(), 0);
        assert!(aut.is_empty());
        assert_eq!(aut.node_count(), 1);
        assert!(aut.contains(&[]));
    }

    #[test]
    fn test_contains_before_seal() {
        let aut = automaton("abcbc");
        for pattern in ["a", "bc", "cbc", "abcbc", ""] {
            assert!(aut.contains(&chars(pattern)), "{pattern}");
        }
        for pattern in ["ac", "cc", "abcbca", "d"] {
            assert!(!aut.contains(&chars(pattern)), "{pattern}");
        }
    }

    #[test]
    fn test_links_shorten() {
        let aut = automaton("abbabbaab");
        for (key, state) in &aut.states {
            match state.link {
                Some(link) => assert!(aut.states[link].length < state.length),
                None => assert_eq!(key, aut.root),
            }
        }
    }

    #[test]
    fn test_clone_created_for_abb() {
        // "abb" needs a clone for the class of "b"
        let aut = automaton("abb");
        assert_eq!(aut.node_count(), 5);
        let b = aut.walk(&['b']).unwrap();
        assert_eq!(aut.states[b].length, 1);
        assert_eq!(aut.reconstruct(b), vec!['b']);
    }

    #[test]
    fn test_reconstruct_longest() {
        let aut = automaton("abcab");
        let state = aut.walk(&chars("cab")).unwrap();
        assert_eq!(aut.reconstruct(state), chars("abcab"));
        let state = aut.walk(&chars("ab")).unwrap();
        assert_eq!(aut.reconstruct(state), chars("ab"));
    }

    #[test]
    fn test_terminals_after_seal() {
        let sealed = automaton("aba").seal();
        let inner = &sealed.inner;
        for suffix in ["aba", "ba", "a", ""] {
            let state = inner.walk(&chars(suffix)).unwrap();
            assert!(inner.states[state].terminal, "{suffix:?}");
        }
        let state = inner.walk(&chars("ab")).unwrap();
        assert!(!inner.states[state].terminal);
    }

    #[test]
    fn test_occurrences() {
        let sealed = SealedAutomaton::build("abababa".chars());
        assert_eq!(sealed.occurrences(&chars("aba")), 3);
        assert_eq!(sealed.occurrences(&chars("b")), 3);
        assert_eq!(sealed.occurrences(&chars("abababa")), 1);
        assert_eq!(sealed.occurrences(&chars("bb")), 0);
        assert_eq!(sealed.occurrences(&[]), 8);
    }

    #[test]
    fn test_refrain_aa() {
        let refrain = SealedAutomaton::build("aa".chars()).dominant_repeat();
        assert_eq!(refrain.symbols, chars("a"));
        assert_eq!(refrain.occurrences, 2);
        assert_eq!(refrain.value, 2);
    }

    #[test]
    fn test_refrain_abcabc() {
        let refrain = SealedAutomaton::build("abcabc".chars()).dominant_repeat();
        assert_eq!(refrain.symbols, chars("abc"));
        assert_eq!(refrain.occurrences, 2);
        assert_eq!(refrain.value, 6);
    }

    #[test]
    fn test_refrain_aaaa_prefers_shorter() {
        let refrain = SealedAutomaton::build("aaaa".chars()).dominant_repeat();
        assert_eq!(refrain.symbols, chars("aa"));
        assert_eq!(refrain.occurrences, 3);
        assert_eq!(refrain.value, 6);
    }

    #[test]
    fn test_refrain_empty() {
        let sealed = SealedAutomaton::<char>::build(std::iter::empty());
        assert_eq!(sealed.node_count(), 1);
        assert_eq!(sealed.dominant_repeat(), Refrain::empty());
    }

    #[test]
    fn test_refrain_whole_text_tie() {
        // "ab" x2 and "abab" x1 both score 4
        let refrain = SealedAutomaton::build("abab".chars()).dominant_repeat();
        assert_eq!(refrain.symbols, chars("ab"));
        assert_eq!(refrain.occurrences, 2);
        assert_eq!(refrain.value, 4);
    }
}
