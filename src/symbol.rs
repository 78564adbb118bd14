/// Symbol types on the edges of the suffix tree.
///
/// The tree appends a synthetic terminator when sealed so that every suffix
/// ends at a leaf. Wrapping the user's symbols in an enum keeps the
/// terminator outside the user's alphabet.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub(crate) enum Symbol<T> {
    /// A symbol taken from the input text.
    Value(T),

    /// Marks the end of the text. Appears exactly once, as the last symbol.
    Terminator,
}

impl<T: Copy> Symbol<T> {
    /// Returns the wrapped value, or `None` for the terminator.
    pub(crate) fn value(&self) -> Option<T> {
        match *self {
            Symbol::Value(v) => Some(v),
            Symbol::Terminator => None,
        }
    }

    pub(crate) fn is_terminator(&self) -> bool {
        matches!(self, Symbol::Terminator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_unwraps() {
        assert_eq!(Symbol::Value(7u8).value(), Some(7));
        assert_eq!(Symbol::<u8>::Terminator.value(), None);
    }

    #[test]
    fn test_terminator_never_equals_value() {
        assert_ne!(Symbol::Value(0u8), Symbol::Terminator);
        assert!(Symbol::<char>::Terminator.is_terminator());
        assert!(!Symbol::Value('a').is_terminator());
    }
}
