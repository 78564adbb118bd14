
use crate::Refrain;
use ahash::AHashSet as HashSet;

/// Counts (possibly overlapping) occurrences of `pattern` in `text`.
pub(crate) fn naive_occurrences<T: PartialEq>(text: &[T], pattern: &[T]) -> usize {
    if pattern.is_empty() {
        return text.len() + 1;
    }
    if pattern.len() > text.len() {
        return 0;
    }
    text.windows(pattern.len()).filter(|w| *w == pattern).count()
}

pub(crate) fn naive_contains<T: PartialEq>(text: &[T], pattern: &[T]) -> bool {
    naive_occurrences(text, pattern) > 0
}

/// Scores every distinct substring; same preference order as the index.
pub(crate) fn naive_refrain(text: &[u8]) -> Refrain<u8> {
    let mut seen = HashSet::new();
    let mut best = Refrain::empty();

    // starts ascending, so the first sighting of a substring is its first occurrence
    for start in 0..text.len() {
        for end in start + 1..=text.len() {
            let substring = &text[start..end];
            if !seen.insert(substring.to_vec()) {
                continue;
            }
            let occurrences = naive_occurrences(text, substring);
            let value = occurrences * substring.len();
            let better = best.is_empty()
                || value > best.value
                || (value == best.value && substring.len() < best.len());
            if better {
                best = Refrain {
                    symbols: substring.to_vec(),
                    occurrences,
                    value,
                };
            }
        }
    }

    best
}

#[test]
fn test_naive_refrain_scenarios() {
    assert_eq!(naive_refrain(b"aaaa").symbols, b"aa".to_vec());
    assert_eq!(naive_refrain(b"aa").symbols, b"a".to_vec());
    assert_eq!(naive_refrain(b"abcabc").value, 6);
    assert_eq!(naive_refrain(b""), Refrain::empty());
}
