use crate::automaton::SuffixAutomaton;
use crate::traversal;
use std::hash::Hash;

/// Annotates every state with the occurrence count of its longest string.
///
/// A state's count is the number of transition paths from it to a terminal
/// state, i.e. the number of suffixes of the text it prefixes. Children are
/// finished before their parents, so one pass suffices.
pub(crate) fn count_occurrences<T: Copy + Eq + Hash>(automaton: &mut SuffixAutomaton<T>) {
    let order = traversal::post_order(&*automaton);

    for key in order {
        let state = &automaton.states[key];
        let below: usize = state
            .transitions
            .values()
            .map(|&child| automaton.states[child].count)
            .sum();
        let count = below + usize::from(state.terminal);
        automaton.states[key].count = count;
    }
}
