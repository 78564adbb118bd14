use crate::node::{NodeKey, TreeNode, OPEN_END};
use crate::refrain::{self, Candidate, Refrain};
use crate::symbol::Symbol;
use slotmap::SlotMap;
use std::hash::Hash;
use std::ops::Range;

/// A point in the tree: `remaining` symbols before the end of `node`'s
/// incoming edge. `remaining == 0` is the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    node: NodeKey,
    remaining: usize,
}

/// Online suffix tree with lazily computed suffix links.
///
/// Leaves keep an open end while the text grows. Sealing appends a
/// terminator so that every suffix ends at its own leaf.
pub struct SuffixTree<T> {
    pub(crate) nodes: SlotMap<NodeKey, TreeNode<T>>,

    pub(crate) text: Vec<Symbol<T>>,

    pub(crate) root: NodeKey,

    /// Pseudo-node whose edge to the root accepts any symbol.
    pub(crate) above_root: NodeKey,

    /// Longest suffix of the text that is not yet a leaf.
    active: Position,
}

impl<T: Copy + Eq + Hash> SuffixTree<T> {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let above_root = nodes.insert(TreeNode::new(0, 0, None));
        let root = nodes.insert(TreeNode::new(0, 0, Some(above_root)));
        nodes[root].link = Some(above_root);

        Self {
            nodes,
            text: Vec::new(),
            root,
            above_root,
            active: Position {
                node: root,
                remaining: 0,
            },
        }
    }

    /// Appends one symbol to the text.
    pub fn push(&mut self, value: T) {
        self.append(Symbol::Value(value));
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }

    fn append(&mut self, symbol: Symbol<T>) {
        self.text.push(symbol);
        let position = self.text.len() - 1;

        while !self.can_go(self.active, symbol) {
            let node = self.split_at(self.active);
            let leaf = self
                .nodes
                .insert(TreeNode::new(position, OPEN_END, Some(node)));
            self.nodes[node].children.insert(symbol, leaf);

            let link = self.link_of(node);
            self.active = Position {
                node: link,
                remaining: 0,
            };
        }

        self.active = self.go(self.active, symbol);
    }

    fn can_go(&self, pos: Position, symbol: Symbol<T>) -> bool {
        if pos.remaining == 0 {
            pos.node == self.above_root || self.nodes[pos.node].children.contains_key(&symbol)
        } else {
            self.text[self.nodes[pos.node].edge_end - pos.remaining] == symbol
        }
    }

    fn go(&self, pos: Position, symbol: Symbol<T>) -> Position {
        if pos.remaining == 0 {
            self.descend(pos.node, symbol)
        } else {
            Position {
                node: pos.node,
                remaining: pos.remaining - 1,
            }
        }
    }

    /// Moves from `node` one symbol into the edge starting with `symbol`.
    fn descend(&self, node: NodeKey, symbol: Symbol<T>) -> Position {
        if node == self.above_root {
            return Position {
                node: self.root,
                remaining: 0,
            };
        }

        let child = self.nodes[node].children[&symbol];
        let edge = &self.nodes[child];
        Position {
            node: child,
            remaining: edge.edge_end - edge.edge_start - 1,
        }
    }

    /// Makes `pos` an explicit node, splitting its edge if needed.
    fn split_at(&mut self, pos: Position) -> NodeKey {
        if pos.remaining == 0 {
            return pos.node;
        }

        let child = pos.node;
        let parent = self.nodes[child]
            .parent
            .expect("edge position below the root has a parent");
        let start = self.nodes[child].edge_start;
        let split = self.nodes[child].edge_end - pos.remaining;

        let node = self.nodes.insert(TreeNode::new(start, split, Some(parent)));
        self.nodes[child].edge_start = split;
        self.nodes[child].parent = Some(node);
        self.nodes[parent].children.insert(self.text[start], node);
        self.nodes[node].children.insert(self.text[split], child);

        tracing::trace!(start, split, "split suffix tree edge");
        node
    }

    /// Returns the suffix link of `node`, computing it on first use.
    ///
    /// A link needs the parent's link, so missing links are resolved from
    /// the top of the chain down.
    fn link_of(&mut self, node: NodeKey) -> NodeKey {
        loop {
            if let Some(link) = self.nodes[node].link {
                return link;
            }

            let mut pending = node;
            while let Some(parent) = self.nodes[pending].parent {
                if self.nodes[parent].link.is_some() {
                    break;
                }
                pending = parent;
            }

            let link = self.build_link(pending);
            self.nodes[pending].link = Some(link);
        }
    }

    /// Skip/count descent from the parent's link along `node`'s edge label.
    fn build_link(&mut self, node: NodeKey) -> NodeKey {
        let parent = self.nodes[node]
            .parent
            .expect("the root link is preset, so the node is below the root");
        let from = self.nodes[parent]
            .link
            .expect("parent link resolved first");

        let mut pos = Position {
            node: from,
            remaining: 0,
        };
        let mut l = self.nodes[node].edge_start;
        let r = self.nodes[node].edge_end;

        while l < r {
            if pos.remaining == 0 {
                pos = self.descend(pos.node, self.text[l]);
                l += 1;
            }
            let step = (r - l).min(pos.remaining);
            pos.remaining -= step;
            l += step;
        }

        self.split_at(pos)
    }

    /// Returns the number of symbols appended.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of tree nodes, root and leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn contains(&self, pattern: &[T]) -> bool {
        self.locate(pattern).is_some()
    }

    /// Text range labelling the incoming edge of `key`, open ends clamped.
    fn edge(&self, key: NodeKey) -> Range<usize> {
        let node = &self.nodes[key];
        node.edge_start..node.edge_end.min(self.text.len())
    }

    /// Returns the node at or directly below the end of `pattern`'s path.
    pub(crate) fn locate(&self, pattern: &[T]) -> Option<NodeKey> {
        let mut node = self.root;
        let mut matched = 0;

        while matched < pattern.len() {
            let child = self.nodes[node].child(Symbol::Value(pattern[matched]))?;
            for offset in self.edge(child) {
                if matched == pattern.len() {
                    break;
                }
                if self.text[offset] != Symbol::Value(pattern[matched]) {
                    return None;
                }
                matched += 1;
            }
            node = child;
        }

        Some(node)
    }

    /// Spells the first `length` text symbols on the path from the root to `key`.
    pub(crate) fn reconstruct(&self, key: NodeKey, length: usize) -> Vec<T> {
        let mut edges = Vec::new();
        let mut current = key;
        while current != self.root {
            edges.push(self.edge(current));
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        edges
            .into_iter()
            .rev()
            .flat_map(|edge| self.text[edge].iter().filter_map(Symbol::value))
            .take(length)
            .collect()
    }

    /// Appends the terminator, closes leaf edges and counts leaves.
    pub fn seal(mut self) -> SealedTree<T> {
        let length = self.text.len();
        self.append(Symbol::Terminator);

        let end = self.text.len();
        for node in self.nodes.values_mut() {
            if node.edge_end == OPEN_END {
                node.edge_end = end;
            }
        }

        self.annotate();

        tracing::debug!(
            text_len = length,
            nodes = self.node_count(),
            "sealed suffix tree"
        );

        SealedTree {
            inner: self,
            length,
        }
    }

    /// Fills in depth top-down, then count and first occurrence bottom-up.
    fn annotate(&mut self) {
        let total = self.text.len();
        let mut stack = vec![(self.root, false)];

        while let Some((key, expanded)) = stack.pop() {
            let children: Vec<NodeKey> = self.nodes[key].children.values().copied().collect();

            if expanded {
                if children.is_empty() {
                    let node = &mut self.nodes[key];
                    node.count = 1;
                    node.first_start = total - node.depth;
                } else {
                    let count = children.iter().map(|&c| self.nodes[c].count).sum::<usize>();
                    let first_start = children
                        .iter()
                        .map(|&c| self.nodes[c].first_start)
                        .min()
                        .unwrap_or(total);
                    let node = &mut self.nodes[key];
                    node.count = count;
                    node.first_start = first_start;
                }
                continue;
            }

            stack.push((key, true));
            let depth = self.nodes[key].depth;
            for child in children {
                let node = &mut self.nodes[child];
                node.depth = depth + (node.edge_end - node.edge_start);
                stack.push((child, false));
            }
        }
    }
}

impl<T: Copy + Eq + Hash> Default for SuffixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> FromIterator<T> for SuffixTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// A finished suffix tree with occurrence counts.
pub struct SealedTree<T> {
    pub(crate) inner: SuffixTree<T>,

    /// Text length, terminator excluded.
    length: usize,
}

impl<T: Copy + Eq + Hash> SealedTree<T> {
    pub fn build<I: IntoIterator<Item = T>>(text: I) -> Self {
        text.into_iter().collect::<SuffixTree<T>>().seal()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn contains(&self, pattern: &[T]) -> bool {
        self.inner.contains(pattern)
    }

    /// Returns how many times `pattern` occurs, overlaps included.
    pub fn occurrences(&self, pattern: &[T]) -> usize {
        self.inner
            .locate(pattern)
            .map_or(0, |node| self.inner.nodes[node].count)
    }

    /// Finds the substring maximizing `length * occurrences`.
    ///
    /// Leaves are scored without the terminator. A leaf whose edge is only the
    /// terminator spells its parent's string and is skipped.
    pub fn dominant_repeat(&self) -> Refrain<T> {
        let tree = &self.inner;
        let candidates = tree
            .nodes
            .iter()
            .filter(|&(key, _)| key != tree.root && key != tree.above_root)
            .filter_map(|(key, node)| {
                let length = if node.is_leaf() {
                    if tree.text[node.edge_start].is_terminator() {
                        return None;
                    }
                    node.depth - 1
                } else {
                    node.depth
                };
                Some(Candidate {
                    node: key,
                    length,
                    occurrences: node.count,
                    first_start: node.first_start,
                })
            });

        let Some(best) = refrain::select(candidates) else {
            return Refrain::empty();
        };

        tracing::debug!(
            length = best.length,
            occurrences = best.occurrences,
            value = best.value(),
            "found dominant repeat"
        );

        Refrain {
            symbols: tree.reconstruct(best.node, best.length),
            occurrences: best.occurrences,
            value: best.value(),
        }
    }
}
