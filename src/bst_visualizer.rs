use clap::ValueEnum;
use tracing::{debug, info, warn};

use crate::bst::{self, Link, TraversalKind};
use crate::layout::{layout_tree, LayoutConfig, TreeLayout};

/// What inserting an already present value does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Leave the tree as it is.
    #[default]
    Ignore,
    /// Store another node in the right subtree of the equal one.
    RouteRight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BstSettings {
    pub duplicates: DuplicatePolicy,
    pub layout: LayoutConfig,
}

/// Result of one visualizer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BstOutcome {
    Inserted(i64),
    /// The value was already present and the policy is [`DuplicatePolicy::Ignore`].
    Duplicate(i64),
    Deleted(i64),
    NotPresent(i64),
    Found(i64),
    NotFound(i64),
    Traversed {
        /// `None` when the requested kind was not recognised.
        kind: Option<TraversalKind>,
        values: Vec<i64>,
    },
    Cleared,
    /// The input was not a number; nothing changed.
    Rejected(String),
}

/// Holds the tree behind the BST page and turns raw user input into engine
/// calls.
#[derive(Debug, Clone, Default)]
pub struct BstVisualizer {
    root: Link<i64>,
    highlighted: Option<i64>,
    traversal: Vec<i64>,
    settings: BstSettings,
}

impl BstVisualizer {
    pub fn new(settings: BstSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, input: &str) -> BstOutcome {
        let Some(value) = parse_value(input) else {
            return BstOutcome::Rejected(input.to_string());
        };
        self.highlighted = None;

        let present = bst::search(&self.root, &value);
        let root = std::mem::take(&mut self.root);
        self.root = match self.settings.duplicates {
            DuplicatePolicy::Ignore => bst::insert_unique(root, value),
            DuplicatePolicy::RouteRight => bst::insert(root, value),
        };

        if present && self.settings.duplicates == DuplicatePolicy::Ignore {
            debug!("{} is already in the tree", value);
            BstOutcome::Duplicate(value)
        } else {
            info!("Inserted {}", value);
            BstOutcome::Inserted(value)
        }
    }

    pub fn delete(&mut self, input: &str) -> BstOutcome {
        let Some(value) = parse_value(input) else {
            return BstOutcome::Rejected(input.to_string());
        };
        self.highlighted = None;

        let present = bst::search(&self.root, &value);
        self.root = bst::delete(std::mem::take(&mut self.root), &value);

        if present {
            info!("Deleted {}", value);
            BstOutcome::Deleted(value)
        } else {
            debug!("{} is not in the tree, nothing to delete", value);
            BstOutcome::NotPresent(value)
        }
    }

    /// Looks `input` up and highlights it when found.
    pub fn search(&mut self, input: &str) -> BstOutcome {
        let Some(value) = parse_value(input) else {
            return BstOutcome::Rejected(input.to_string());
        };

        if bst::search(&self.root, &value) {
            self.highlighted = Some(value);
            BstOutcome::Found(value)
        } else {
            self.highlighted = None;
            BstOutcome::NotFound(value)
        }
    }

    /// Runs a traversal. An unknown kind yields an empty result.
    pub fn traverse(&mut self, kind: &str) -> BstOutcome {
        self.highlighted = None;
        let kind = match kind.parse::<TraversalKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        self.traversal = kind
            .map(|kind| bst::traverse(&self.root, kind))
            .unwrap_or_default();
        debug!("Traversal {:?}: {:?}", kind, self.traversal);

        BstOutcome::Traversed {
            kind,
            values: self.traversal.clone(),
        }
    }

    pub fn clear(&mut self) -> BstOutcome {
        self.root = Link::empty();
        self.highlighted = None;
        self.traversal.clear();
        BstOutcome::Cleared
    }

    /// Positions the current tree, tagging the highlighted value.
    pub fn layout(&self) -> TreeLayout<i64> {
        layout_tree(
            &self.root,
            &self.settings.layout,
            self.highlighted.as_ref(),
        )
    }

    pub fn root(&self) -> &Link<i64> {
        &self.root
    }

    pub fn highlighted(&self) -> Option<i64> {
        self.highlighted
    }

    /// Values of the last traversal.
    pub fn traversal(&self) -> &[i64] {
        &self.traversal
    }

    pub fn len(&self) -> usize {
        bst::len(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn settings(&self) -> &BstSettings {
        &self.settings
    }
}

fn parse_value(input: &str) -> Option<i64> {
    match input.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring non-numeric input {:?}: {}", input, e);
            None
        }
    }
}
