//! Engines and page controllers for the DSAForge tree visualizers.
//!
//! [`bst`] and [`trie`] are the pure data structures. [`layout`] positions a
//! BST for drawing. [`bst_visualizer`] and [`trie_visualizer`] hold page state
//! and turn raw user input into engine calls, and [`store`] persists what the
//! trie page keeps between sessions.

pub mod bst;
pub mod bst_visualizer;
pub mod command;
pub mod layout;
pub mod store;
pub mod trie;
pub mod trie_visualizer;

pub use bst::{BstNode, Link, TraversalKind};
pub use bst_visualizer::{BstOutcome, BstSettings, BstVisualizer, DuplicatePolicy};
pub use layout::{layout_tree, LayoutConfig, Point, RenderNode, TreeLayout};
pub use store::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore, StoreError};
pub use trie::Trie;
pub use trie_visualizer::TrieVisualizer;
