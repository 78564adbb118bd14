use crate::symbol::Symbol;
use ahash::AHashMap as HashMap;
use std::hash::Hash;

slotmap::new_key_type! {
    /// Stable handle to a node in an index arena.
    ///
    /// Links, parents and transitions all store keys; the arena is the only owner.
    pub struct NodeKey;
}

/// End offset of a leaf edge that still grows with the text.
pub(crate) const OPEN_END: usize = usize::MAX;

/// A state of the suffix automaton: one end-position equivalence class.
#[derive(Debug, Clone)]
pub(crate) struct State<T> {
    /// Length of the longest string reaching this state from the root.
    pub length: usize,

    /// Suffix link. `None` only on the root.
    pub link: Option<NodeKey>,

    /// State and symbol that first reached this state along its longest path.
    pub parent: Option<(NodeKey, T)>,

    pub transitions: HashMap<T, NodeKey>,

    /// Set by sealing on every state along the link chain of the last state.
    pub terminal: bool,

    /// Occurrences of the longest representative. Zero until sealed.
    pub count: usize,

    /// Text offset of the last symbol of the first occurrence.
    pub first_end: usize,
}

impl<T: Copy + Eq + Hash> State<T> {
    pub(crate) fn root() -> Self {
        Self {
            length: 0,
            link: None,
            parent: None,
            transitions: HashMap::new(),
            terminal: false,
            count: 0,
            first_end: 0,
        }
    }

    pub(crate) fn new(length: usize, parent: NodeKey, symbol: T, first_end: usize) -> Self {
        Self {
            length,
            link: None,
            parent: Some((parent, symbol)),
            transitions: HashMap::new(),
            terminal: false,
            count: 0,
            first_end,
        }
    }

    /// Copies `self` into a shorter class ending at the same positions.
    ///
    /// Transitions and the suffix link are shared with the original.
    pub(crate) fn clone_as(&self, length: usize, parent: NodeKey, symbol: T) -> Self {
        Self {
            length,
            link: self.link,
            parent: Some((parent, symbol)),
            transitions: self.transitions.clone(),
            terminal: false,
            count: 0,
            first_end: self.first_end,
        }
    }

    #[inline]
    pub(crate) fn can_transition(&self, symbol: T) -> bool {
        self.transitions.contains_key(&symbol)
    }

    #[inline]
    pub(crate) fn transition(&self, symbol: T) -> Option<NodeKey> {
        self.transitions.get(&symbol).copied()
    }
}

/// A vertex of the compressed suffix tree.
///
/// The incoming edge is labelled by `text[edge_start..edge_end]`.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<T> {
    pub edge_start: usize,

    /// `OPEN_END` for leaves until the tree is sealed.
    pub edge_end: usize,

    /// `None` only on the pseudo-root above the root.
    pub parent: Option<NodeKey>,

    /// Suffix link, computed on first demand.
    pub link: Option<NodeKey>,

    pub children: HashMap<Symbol<T>, NodeKey>,

    /// Length of the substring spelled from the root to the end of the edge.
    pub depth: usize,

    /// Number of leaves below, i.e. occurrences of the spelled substring.
    pub count: usize,

    /// Smallest start offset among those occurrences.
    pub first_start: usize,
}

impl<T: Copy + Eq + Hash> TreeNode<T> {
    pub(crate) fn new(edge_start: usize, edge_end: usize, parent: Option<NodeKey>) -> Self {
        Self {
            edge_start,
            edge_end,
            parent,
            link: None,
            children: HashMap::new(),
            depth: 0,
            count: 0,
            first_start: 0,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(crate) fn child(&self, symbol: Symbol<T>) -> Option<NodeKey> {
        self.children.get(&symbol).copied()
    }
}
