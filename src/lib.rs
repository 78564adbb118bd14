//! # Refrain - Online Substring Indexing
//!
//! Indexes a symbol sequence one symbol at a time and answers:
//! 1. **Membership**: does a sequence occur as a substring?
//! 2. **Occurrences**: how many times does a substring occur?
//! 3. **Refrain**: which substring maximizes `length * occurrences`?
//!
//! Two construction strategies satisfy the same contract: a suffix automaton
//! ([`SuffixAutomaton`], the default) and a suffix tree with lazily built
//! suffix links ([`SuffixTree`]). Builders are sealed once the text is
//! complete; sealing counts occurrences and unlocks the refrain search.
//!
//! ## Example
//!
//! ```
//! use refrain_rs::SuffixAutomaton;
//!
//! let mut automaton = SuffixAutomaton::new();
//! automaton.extend("abcabc".chars());
//! assert!(automaton.contains(&['c', 'a']));
//!
//! let index = automaton.seal();
//! let refrain = index.dominant_repeat();
//! assert_eq!(refrain.symbols, vec!['a', 'b', 'c']);
//! assert_eq!(refrain.occurrences, 2);
//! assert_eq!(refrain.value, 6);
//! ```
//!
//! ## Ties
//!
//! Equal values go to the shorter substring, then to the one occurring first.
//! Both strategies return identical refrains.
//!
//! ## Performance
//!
//! - O(1) amortized time per symbol appended (fixed alphabet)
//! - At most `2n` automaton states, `2n + 1` tree nodes
//! - Iterative traversals; no recursion depth limits on long texts

mod automaton;
pub mod codec;
mod counter;
mod index;
mod node;
mod refrain;
mod symbol;
mod traversal;
mod tree;

#[cfg(test)]
mod tests;

pub use automaton::{SealedAutomaton, SuffixAutomaton};
pub use index::{build_index, build_index_with, Strategy, SubstringIndex};
pub use refrain::Refrain;
pub use tree::{SealedTree, SuffixTree};
