//! Positions a binary search tree on a 2-D canvas.
//!
//! The layout is a pure function of the tree shape and the [`LayoutConfig`]:
//! the root sits at the origin, each level is `level_height` lower, and a
//! child at depth `d` is shifted sideways by `spacing / d` from its parent.

use serde::Serialize;

use crate::bst::{BstNode, Link};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Where the root is drawn.
    pub origin: Point,
    /// Horizontal offset of the root's children. Deeper levels use
    /// `spacing / level`.
    pub spacing: f64,
    pub level_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            origin: Point::new(400.0, 50.0),
            spacing: 200.0,
            level_height: 80.0,
        }
    }
}

/// A node placed on the canvas. Carries no identity beyond `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode<T> {
    pub value: T,
    pub x: f64,
    pub y: f64,
    pub parent: Option<Point>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout<T> {
    /// Nodes in pre-order.
    pub nodes: Vec<RenderNode<T>>,
    /// One segment per parent-child link, in the order of `nodes`.
    pub edges: Vec<Edge>,
}

impl<T> TreeLayout<T> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct Pending<'a, T> {
    node: &'a BstNode<T>,
    at: Point,
    level: u32,
    parent: Option<Point>,
}

/// Lays out the tree under `root`. Nodes equal to `highlighted` are tagged.
pub fn layout_tree<T: Clone + PartialEq>(
    root: &Link<T>,
    config: &LayoutConfig,
    highlighted: Option<&T>,
) -> TreeLayout<T> {
    let mut layout = TreeLayout {
        nodes: Vec::new(),
        edges: Vec::new(),
    };

    let mut stack: Vec<Pending<'_, T>> = root
        .as_node()
        .map(|node| Pending {
            node,
            at: config.origin,
            level: 1,
            parent: None,
        })
        .into_iter()
        .collect();

    while let Some(Pending {
        node,
        at,
        level,
        parent,
    }) = stack.pop()
    {
        layout.nodes.push(RenderNode {
            value: node.value.clone(),
            x: at.x,
            y: at.y,
            parent,
            highlighted: highlighted == Some(&node.value),
        });
        if let Some(from) = parent {
            layout.edges.push(Edge { from, to: at });
        }

        let offset = config.spacing / f64::from(level);
        let child_y = at.y + config.level_height;
        // Right first so that the left subtree is laid out first.
        if let Some(right) = node.right.as_node() {
            stack.push(Pending {
                node: right,
                at: Point::new(at.x + offset, child_y),
                level: level + 1,
                parent: Some(at),
            });
        }
        if let Some(left) = node.left.as_node() {
            stack.push(Pending {
                node: left,
                at: Point::new(at.x - offset, child_y),
                level: level + 1,
                parent: Some(at),
            });
        }
    }

    layout
}
