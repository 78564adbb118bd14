use crate::node::NodeKey;
use slotmap::SecondaryMap;

/// A rooted graph whose edges are symbol transitions.
///
/// Transitions of a suffix automaton form a DAG, not a tree: several states on
/// one suffix-link chain may share a target.
pub(crate) trait TransitionGraph {
    fn root(&self) -> NodeKey;

    fn successors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_;
}

/// Returns every node reachable from the root, each exactly once, children
/// before parents.
///
/// Iterative so that long texts cannot overflow the call stack.
pub(crate) fn post_order<G: TransitionGraph>(graph: &G) -> Vec<NodeKey> {
    let mut visited: SecondaryMap<NodeKey, bool> = SecondaryMap::new();
    let mut order = Vec::new();
    let mut stack = vec![(graph.root(), false)];

    while let Some((key, expanded)) = stack.pop() {
        if expanded {
            order.push(key);
            continue;
        }
        if visited.insert(key, true).is_some() {
            continue;
        }

        stack.push((key, true));
        for child in graph.successors(key) {
            if !visited.contains_key(child) {
                stack.push((child, false));
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    struct Adjacency {
        root: NodeKey,
        edges: SecondaryMap<NodeKey, Vec<NodeKey>>,
    }

    impl TransitionGraph for Adjacency {
        fn root(&self) -> NodeKey {
            self.root
        }

        fn successors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
            self.edges.get(key).into_iter().flatten().copied()
        }
    }

    #[test]
    fn test_diamond_visits_shared_child_once() {
        let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let root = keys.insert(());
        let left = keys.insert(());
        let right = keys.insert(());
        let bottom = keys.insert(());

        let mut edges = SecondaryMap::new();
        edges.insert(root, vec![left, right]);
        edges.insert(left, vec![bottom]);
        edges.insert(right, vec![bottom]);

        let order = post_order(&Adjacency { root, edges });
        assert_eq!(order.len(), 4);
        assert_eq!(order.last(), Some(&root));

        let position = |k: NodeKey| order.iter().position(|&o| o == k).unwrap();
        assert!(position(bottom) < position(left));
        assert!(position(bottom) < position(right));
    }

    #[test]
    fn test_single_root() {
        let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let root = keys.insert(());
        let order = post_order(&Adjacency {
            root,
            edges: SecondaryMap::new(),
        });
        assert_eq!(order, vec![root]);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let chain: Vec<NodeKey> = (0..200_000).map(|_| keys.insert(())).collect();
        let mut edges = SecondaryMap::new();
        for pair in chain.windows(2) {
            edges.insert(pair[0], vec![pair[1]]);
        }

        let order = post_order(&Adjacency {
            root: chain[0],
            edges,
        });
        assert_eq!(order.len(), chain.len());
        assert_eq!(order[0], chain[chain.len() - 1]);
    }
}
