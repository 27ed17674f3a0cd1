use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An owned link to a subtree, possibly empty.
///
/// Dropping, cloning and comparing walk the subtree with an explicit stack,
/// so a degenerate tree of any depth is torn down without recursion.
pub struct Link<T>(Option<Box<BstNode<T>>>);

/// A node in an unbalanced binary search tree.
///
/// Every value in `left` is less than `value`; every value in `right` is
/// greater than or equal to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BstNode<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> BstNode<T> {
    pub fn new(value: T) -> Self {
        BstNode {
            value,
            left: Link::empty(),
            right: Link::empty(),
        }
    }
}

impl<T> Link<T> {
    /// The empty tree.
    pub fn empty() -> Self {
        Link(None)
    }

    pub fn leaf(value: T) -> Self {
        BstNode::new(value).into()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_node(&self) -> Option<&BstNode<T>> {
        self.0.as_deref()
    }

    fn take(&mut self) -> Option<Box<BstNode<T>>> {
        self.0.take()
    }

    /// Values in pre-order, borrowed.
    fn preorder_refs(&self) -> Vec<&T> {
        let mut result = Vec::new();
        let mut stack: Vec<&BstNode<T>> = self.as_node().into_iter().collect();
        while let Some(node) = stack.pop() {
            result.push(&node.value);
            stack.extend(node.right.as_node());
            stack.extend(node.left.as_node());
        }
        result
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Link::empty()
    }
}

impl<T> From<BstNode<T>> for Link<T> {
    fn from(node: BstNode<T>) -> Self {
        Link(Some(Box::new(node)))
    }
}

impl<T> Drop for Link<T> {
    fn drop(&mut self) {
        // Detach children before each node is freed so no drop nests.
        let mut stack: Vec<Box<BstNode<T>>> = self.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T: Clone> Clone for Link<T> {
    fn clone(&self) -> Self {
        // Post-order rebuild: a node is copied once both of its subtrees are.
        let mut built: Vec<Link<T>> = Vec::new();
        let mut stack: Vec<(&BstNode<T>, bool)> =
            self.as_node().map(|node| (node, false)).into_iter().collect();
        while let Some((node, children_done)) = stack.pop() {
            if children_done {
                // The right subtree was finished last, so it is on top.
                let right = if node.right.is_empty() {
                    Link::empty()
                } else {
                    built.pop().unwrap_or_default()
                };
                let left = if node.left.is_empty() {
                    Link::empty()
                } else {
                    built.pop().unwrap_or_default()
                };
                built.push(
                    BstNode {
                        value: node.value.clone(),
                        left,
                        right,
                    }
                    .into(),
                );
            } else {
                stack.push((node, true));
                stack.extend(node.right.as_node().map(|child| (child, false)));
                stack.extend(node.left.as_node().map(|child| (child, false)));
            }
        }
        built.pop().unwrap_or_default()
    }
}

impl<T: PartialEq> PartialEq for Link<T> {
    /// Same shape and same values.
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            match (a.as_node(), b.as_node()) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.value != b.value {
                        return false;
                    }
                    stack.push((&a.left, &b.left));
                    stack.push((&a.right, &b.right));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for Link<T> {}

impl<T: fmt::Debug> fmt::Debug for Link<T> {
    /// Shown as the values in pre-order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.preorder_refs()).finish()
    }
}

/// Inserts `value` and returns the root the caller must keep.
///
/// Values equal to an existing node are routed into its right subtree, so
/// duplicates are stored as separate nodes.
pub fn insert<T: Ord>(mut root: Link<T>, value: T) -> Link<T> {
    let mut slot = &mut root;
    while !slot.is_empty() {
        let Some(node) = &mut slot.0 else {
            unreachable!()
        };
        slot = if value < node.value {
            &mut node.left
        } else {
            &mut node.right
        };
    }
    *slot = Link::leaf(value);
    root
}

/// Inserts `value` unless an equal value is already present.
pub fn insert_unique<T: Ord>(mut root: Link<T>, value: T) -> Link<T> {
    let slot = find_slot(&mut root, &value);
    if slot.is_empty() {
        *slot = Link::leaf(value);
    }
    root
}

/// Removes one node holding `value` and returns the new root.
///
/// Deleting a missing value (or deleting from the empty tree) leaves the tree
/// untouched. A node with two children keeps its position and takes the
/// value of its in-order successor, which is then unlinked from the right
/// subtree.
pub fn delete<T: Ord>(mut root: Link<T>, value: &T) -> Link<T> {
    let slot = find_slot(&mut root, value);
    if let Some(mut node) = slot.take() {
        let left = std::mem::take(&mut node.left);
        let mut right = std::mem::take(&mut node.right);
        *slot = if left.is_empty() {
            right
        } else if right.is_empty() {
            left
        } else {
            if let Some(successor) = take_min(&mut right) {
                node.value = successor;
            }
            node.left = left;
            node.right = right;
            Link(Some(node))
        };
    }
    root
}

/// Returns `true` if some node holds `value`.
pub fn search<T: Ord>(root: &Link<T>, value: &T) -> bool {
    let mut current = root.as_node();
    while let Some(node) = current {
        current = match value.cmp(&node.value) {
            Ordering::Less => node.left.as_node(),
            Ordering::Greater => node.right.as_node(),
            Ordering::Equal => return true,
        };
    }
    false
}

/// Collects the values of the tree in the order given by `kind`.
pub fn traverse<T: Clone>(root: &Link<T>, kind: TraversalKind) -> Vec<T> {
    match kind {
        TraversalKind::Inorder => inorder(root),
        TraversalKind::Preorder => root.preorder_refs().into_iter().cloned().collect(),
        TraversalKind::Postorder => postorder(root),
    }
}

fn inorder<T: Clone>(root: &Link<T>) -> Vec<T> {
    let mut result = Vec::new();
    let mut stack: Vec<&BstNode<T>> = Vec::new();
    let mut current = root.as_node();
    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left.as_node();
        }
        let Some(node) = stack.pop() else {
            break;
        };
        result.push(node.value.clone());
        current = node.right.as_node();
    }
    result
}

fn postorder<T: Clone>(root: &Link<T>) -> Vec<T> {
    // Self, right, left reversed is left, right, self.
    let mut result = Vec::new();
    let mut stack: Vec<&BstNode<T>> = root.as_node().into_iter().collect();
    while let Some(node) = stack.pop() {
        result.push(node.value.clone());
        stack.extend(node.left.as_node());
        stack.extend(node.right.as_node());
    }
    result.reverse();
    result
}

/// Number of nodes in the tree.
pub fn len<T>(root: &Link<T>) -> usize {
    root.preorder_refs().len()
}

/// Number of levels in the tree, `0` for the empty tree.
pub fn height<T>(root: &Link<T>) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(&BstNode<T>, usize)> =
        root.as_node().into_iter().map(|node| (node, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.left.as_node().map(|child| (child, depth + 1)));
        stack.extend(node.right.as_node().map(|child| (child, depth + 1)));
    }
    deepest
}

pub fn min<T>(root: &Link<T>) -> Option<&T> {
    let mut node = root.as_node()?;
    while let Some(left) = node.left.as_node() {
        node = left;
    }
    Some(&node.value)
}

pub fn max<T>(root: &Link<T>) -> Option<&T> {
    let mut node = root.as_node()?;
    while let Some(right) = node.right.as_node() {
        node = right;
    }
    Some(&node.value)
}

/// Walks down to the link holding `value`, or to the empty link where it
/// would be inserted.
fn find_slot<'a, T: Ord>(mut slot: &'a mut Link<T>, value: &T) -> &'a mut Link<T> {
    loop {
        match slot.as_node().map(|node| value.cmp(&node.value)) {
            Some(Ordering::Less) => {
                let Some(node) = &mut slot.0 else {
                    unreachable!()
                };
                slot = &mut node.left;
            }
            Some(Ordering::Greater) => {
                let Some(node) = &mut slot.0 else {
                    unreachable!()
                };
                slot = &mut node.right;
            }
            _ => return slot,
        }
    }
}

/// Unlinks the leftmost node under `slot` and returns its value.
fn take_min<T>(mut slot: &mut Link<T>) -> Option<T> {
    while slot.as_node().is_some_and(|node| !node.left.is_empty()) {
        let Some(node) = &mut slot.0 else {
            unreachable!()
        };
        slot = &mut node.left;
    }
    let mut node = slot.take()?;
    *slot = std::mem::take(&mut node.right);
    let BstNode { value, .. } = *node;
    Some(value)
}

/// The order in which [`traverse`] visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    /// Left, self, right. Yields values in ascending order.
    Inorder,
    /// Self, left, right.
    Preorder,
    /// Left, right, self.
    Postorder,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 3] = [
        TraversalKind::Inorder,
        TraversalKind::Preorder,
        TraversalKind::Postorder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalKind::Inorder => "inorder",
            TraversalKind::Preorder => "preorder",
            TraversalKind::Postorder => "postorder",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown traversal kind `{}`, expected inorder, preorder or postorder", .0)]
pub struct ParseTraversalKindError(pub String);

impl FromStr for TraversalKind {
    type Err = ParseTraversalKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inorder" => Ok(TraversalKind::Inorder),
            "preorder" => Ok(TraversalKind::Preorder),
            "postorder" => Ok(TraversalKind::Postorder),
            _ => Err(ParseTraversalKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn build(values: &[i64]) -> Link<i64> {
        values.iter().fold(Link::empty(), |root, v| insert(root, *v))
    }

    fn is_sorted(values: &[i64]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_insert_into_empty_tree_creates_leaf() {
        let root = insert(Link::empty(), 7);
        assert_eq!(root, Link::leaf(7));
    }

    #[test]
    fn test_scenario_traversals() {
        let root = build(&[50, 30, 70, 20, 40]);
        assert_eq!(traverse(&root, TraversalKind::Inorder), vec![20, 30, 40, 50, 70]);
        assert_eq!(traverse(&root, TraversalKind::Preorder), vec![50, 30, 20, 40, 70]);
        assert_eq!(traverse(&root, TraversalKind::Postorder), vec![20, 40, 30, 70, 50]);
    }

    #[test]
    fn test_delete_two_child_node_takes_successor() {
        let root = build(&[50, 30, 70, 20, 40]);
        let root = delete(root, &30);

        assert_eq!(traverse(&root, TraversalKind::Inorder), vec![20, 40, 50, 70]);
        let top = root.as_node().unwrap();
        let replaced = top.left.as_node().unwrap();
        assert_eq!(replaced.value, 40);
        assert_eq!(replaced.left.as_node().map(|n| n.value), Some(20));
        assert!(replaced.right.is_empty());
    }

    #[test]
    fn test_delete_successor_with_right_child() {
        let root = build(&[50, 30, 80, 60, 90, 70]);
        let root = delete(root, &50);

        let top = root.as_node().unwrap();
        assert_eq!(top.value, 60);
        // 70 moved up into the successor's old slot.
        let right = top.right.as_node().unwrap();
        assert_eq!(right.value, 80);
        assert_eq!(right.left.as_node().map(|n| n.value), Some(70));
        assert_eq!(traverse(&root, TraversalKind::Inorder), vec![30, 60, 70, 80, 90]);
    }

    #[test]
    fn test_delete_leaf_and_single_child() {
        let root = build(&[50, 30, 20]);
        let root = delete(root, &30);
        assert_eq!(traverse(&root, TraversalKind::Preorder), vec![50, 20]);

        let root = delete(root, &20);
        assert_eq!(root, Link::leaf(50));

        let root = delete(root, &50);
        assert!(root.is_empty());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        assert!(delete(Link::<i64>::empty(), &1).is_empty());

        let root = build(&[5, 3, 8]);
        let before = root.clone();
        let root = delete(root, &4);
        assert_eq!(root, before);
    }

    #[test]
    fn test_search() {
        let root = build(&[50, 30, 70, 20, 40]);
        assert!(search(&root, &40));
        assert!(search(&root, &50));
        assert!(!search(&root, &45));
        assert!(!search(&Link::<i64>::empty(), &45));
    }

    #[test]
    fn test_equal_values_route_right() {
        let root = build(&[5, 5]);
        let top = root.as_node().unwrap();
        assert!(top.left.is_empty());
        assert_eq!(top.right.as_node().map(|n| n.value), Some(5));
        assert_eq!(len(&root), 2);

        // Each delete removes one copy.
        let root = delete(root, &5);
        assert!(search(&root, &5));
        let root = delete(root, &5);
        assert!(!search(&root, &5));
    }

    #[test]
    fn test_insert_unique_ignores_duplicates() {
        let root = [5, 3, 5, 3, 9]
            .into_iter()
            .fold(Link::empty(), |root, v| insert_unique(root, v));
        assert_eq!(len(&root), 3);
        assert_eq!(traverse(&root, TraversalKind::Inorder), vec![3, 5, 9]);
    }

    #[test]
    fn test_sorted_input_degrades_to_a_chain() {
        let values: Vec<i64> = (0..5_000).collect();
        let root = build(&values);
        assert_eq!(height(&root), 5_000);
        assert_eq!(traverse(&root, TraversalKind::Inorder), values);
        assert_eq!(traverse(&root, TraversalKind::Postorder).len(), 5_000);
        assert_eq!(root.clone(), root);
    }

    /// A right-leaning chain `0 -> 1 -> ... -> depth - 1`, built bottom-up.
    fn chain(depth: i64) -> Link<i64> {
        (0..depth).rev().fold(Link::empty(), |right, value| {
            BstNode {
                value,
                left: Link::empty(),
                right,
            }
            .into()
        })
    }

    #[test]
    fn test_deep_chain_drops_clones_and_compares() {
        let root = chain(200_000);
        assert_eq!(height(&root), 200_000);
        assert_eq!(min(&root), Some(&0));
        assert_eq!(max(&root), Some(&199_999));

        let copy = root.clone();
        assert_eq!(copy, root);
        let shorter = chain(199_999);
        assert_ne!(shorter, root);
        drop(shorter);
        drop(copy);

        let root = delete(root, &0);
        assert_eq!(len(&root), 199_999);
        drop(root);
    }

    #[test]
    fn test_clone_keeps_shape() {
        let root = build(&[50, 30, 70, 20, 40, 60, 80, 45]);
        let copy = root.clone();
        assert_eq!(copy, root);
        assert_eq!(
            traverse(&copy, TraversalKind::Preorder),
            traverse(&root, TraversalKind::Preorder)
        );
        // Same values, different shape.
        assert_ne!(build(&[1, 2]), build(&[2, 1]));
        assert_eq!(format!("{:?}", build(&[2, 1, 3])), "[2, 1, 3]");
    }

    #[test]
    fn test_min_max_height() {
        let root = build(&[50, 30, 70, 20, 40]);
        assert_eq!(min(&root), Some(&20));
        assert_eq!(max(&root), Some(&70));
        assert_eq!(height(&root), 3);
        assert_eq!(min(&Link::<i64>::empty()), None);
        assert_eq!(height(&Link::<i64>::empty()), 0);
    }

    #[test]
    fn test_parse_traversal_kind() {
        assert_eq!("inorder".parse::<TraversalKind>(), Ok(TraversalKind::Inorder));
        assert_eq!(" PostOrder ".parse::<TraversalKind>(), Ok(TraversalKind::Postorder));
        assert_eq!(
            "levelorder".parse::<TraversalKind>(),
            Err(ParseTraversalKindError("levelorder".into()))
        );
        for kind in TraversalKind::ALL {
            assert_eq!(kind.to_string().parse::<TraversalKind>(), Ok(kind));
        }
    }

    proptest! {
        #[test]
        fn inorder_is_sorted(values in prop::collection::vec(-500i64..500, 0..64)) {
            let root = build(&values);
            prop_assert!(is_sorted(&traverse(&root, TraversalKind::Inorder)));
        }

        #[test]
        fn inserted_values_are_found(values in prop::collection::vec(-500i64..500, 0..64)) {
            let root = build(&values);
            for v in &values {
                prop_assert!(search(&root, v));
            }
        }

        #[test]
        fn delete_keeps_order_and_removes(
            values in prop::collection::vec(-50i64..50, 1..64),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut unique = values.clone();
            unique.sort();
            unique.dedup();
            let root = unique.iter().fold(Link::empty(), |root, v| insert_unique(root, *v));
            let victim = unique[pick.index(unique.len())];

            let root = delete(root, &victim);
            let remaining = traverse(&root, TraversalKind::Inorder);
            prop_assert!(!search(&root, &victim));
            prop_assert!(is_sorted(&remaining));
            prop_assert_eq!(remaining.len(), unique.len() - 1);
        }

        #[test]
        fn traversal_sizes_match(values in prop::collection::vec(-500i64..500, 0..64)) {
            let root = build(&values);
            let live = len(&root);
            prop_assert_eq!(live, values.len());
            for kind in TraversalKind::ALL {
                prop_assert_eq!(traverse(&root, kind).len(), live);
            }
        }
    }
}
