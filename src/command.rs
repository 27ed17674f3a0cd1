//! One-line commands for both visualizers, e.g. `insert 50` or
//! `put key some value`, and the text each one prints.

use std::str::FromStr;

use thiserror::Error;

use crate::bst_visualizer::{BstOutcome, BstVisualizer};
use crate::layout::TreeLayout;
use crate::store::{SnapshotStore, StoreError};
use crate::trie_visualizer::TrieVisualizer;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{}`", .0)]
    UnknownVerb(String),

    #[error("`{}` expects {}", .verb, .expected)]
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },
}

/// How `layout` output is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Yields the lines of a script that carry a command, skipping blanks and
/// `#` comments.
pub fn script_lines(script: &str) -> impl Iterator<Item = &str> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn split_verb(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_ascii_lowercase(), rest.trim()),
        None => (line.to_ascii_lowercase(), ""),
    }
}

fn required<'a>(
    arg: &'a str,
    verb: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument { verb, expected })
    } else {
        Ok(arg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BstCommand {
    Insert(String),
    Delete(String),
    Search(String),
    Traverse(String),
    Layout,
    Clear,
}

impl FromStr for BstCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = split_verb(line);
        let command = match verb.as_str() {
            "insert" => BstCommand::Insert(required(arg, "insert", "a value")?.into()),
            "delete" => BstCommand::Delete(required(arg, "delete", "a value")?.into()),
            "search" => BstCommand::Search(required(arg, "search", "a value")?.into()),
            "traverse" => BstCommand::Traverse(
                required(arg, "traverse", "inorder, preorder or postorder")?.into(),
            ),
            "layout" => BstCommand::Layout,
            "clear" => BstCommand::Clear,
            _ => return Err(CommandError::UnknownVerb(verb)),
        };
        Ok(command)
    }
}

/// Applies `command` and returns the text to show for it.
pub fn execute_bst(
    vis: &mut BstVisualizer,
    command: BstCommand,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let outcome = match command {
        BstCommand::Insert(value) => vis.insert(&value),
        BstCommand::Delete(value) => vis.delete(&value),
        BstCommand::Search(value) => vis.search(&value),
        BstCommand::Traverse(kind) => vis.traverse(&kind),
        BstCommand::Clear => vis.clear(),
        BstCommand::Layout => {
            let layout = vis.layout();
            return match format {
                OutputFormat::Json => serde_json::to_string(&layout),
                OutputFormat::Text => Ok(render_layout(&layout)),
            };
        }
    };
    Ok(describe_bst(&outcome))
}

fn describe_bst(outcome: &BstOutcome) -> String {
    match outcome {
        BstOutcome::Inserted(v) => format!("inserted {}", v),
        BstOutcome::Duplicate(v) => format!("{} is already in the tree", v),
        BstOutcome::Deleted(v) => format!("deleted {}", v),
        BstOutcome::NotPresent(v) => format!("{} is not in the tree", v),
        BstOutcome::Found(v) => format!("found {}", v),
        BstOutcome::NotFound(v) => format!("{} not found", v),
        BstOutcome::Traversed {
            kind: Some(kind),
            values,
        } => format!("{}: {}", kind, join_values(values, " → ")),
        BstOutcome::Traversed { kind: None, .. } => "no traversal selected".to_string(),
        BstOutcome::Cleared => "cleared".to_string(),
        BstOutcome::Rejected(input) => format!("ignored non-numeric input {:?}", input),
    }
}

fn join_values(values: &[i64], separator: &str) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_layout(layout: &TreeLayout<i64>) -> String {
    if layout.is_empty() {
        return "(empty tree)".to_string();
    }
    layout
        .nodes
        .iter()
        .map(|node| {
            let mark = if node.highlighted { " *" } else { "" };
            format!("{} @ ({}, {}){}", node.value, node.x, node.y, mark)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieCommand {
    Insert(String),
    Search(String),
    Delete(String),
    Suggest(String),
    Path(String),
    Words,
    Put { key: String, value: String },
    Map,
    Clear,
    Export,
}

impl FromStr for TrieCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = split_verb(line);
        let command = match verb.as_str() {
            "insert" => TrieCommand::Insert(arg.into()),
            "search" => TrieCommand::Search(arg.into()),
            "delete" => TrieCommand::Delete(arg.into()),
            "suggest" => TrieCommand::Suggest(required(arg, "suggest", "a prefix")?.into()),
            "path" => TrieCommand::Path(arg.into()),
            "words" => TrieCommand::Words,
            "put" => {
                let (key, value) = arg
                    .split_once(char::is_whitespace)
                    .map(|(key, value)| (key, value.trim()))
                    .unwrap_or((arg, ""));
                let key = required(key, "put", "a key and a value")?;
                let value = required(value, "put", "a key and a value")?;
                TrieCommand::Put {
                    key: key.into(),
                    value: value.into(),
                }
            }
            "map" => TrieCommand::Map,
            "clear" => TrieCommand::Clear,
            "export" => TrieCommand::Export,
            _ => return Err(CommandError::UnknownVerb(verb)),
        };
        Ok(command)
    }
}

/// Applies `command` and returns the text to show for it.
pub async fn execute_trie<S: SnapshotStore>(
    vis: &mut TrieVisualizer<S>,
    command: TrieCommand,
) -> Result<String, StoreError> {
    let reply = match command {
        TrieCommand::Insert(word) => {
            if vis.insert(&word) {
                format!("inserted {}", word)
            } else {
                "ignored blank word".to_string()
            }
        }
        TrieCommand::Search(word) => {
            if vis.search(&word) {
                format!("found {}", word)
            } else {
                let matched: String = vis.highlight_path().iter().collect();
                format!("{} not found (matched {:?})", word, matched)
            }
        }
        TrieCommand::Delete(word) => {
            if vis.delete(&word) {
                format!("deleted {}", word)
            } else {
                format!("{} is not in the trie", word)
            }
        }
        TrieCommand::Suggest(prefix) => lines_or(vis.autocomplete(&prefix), "(no suggestions)"),
        TrieCommand::Path(word) => vis.path(&word).iter().collect::<String>(),
        TrieCommand::Words => {
            let words: Vec<&str> = vis.words().collect();
            lines_or(&words, "(no words)")
        }
        TrieCommand::Put { key, value } => {
            if vis.put(&key, &value) {
                format!("{}: {}", key, value)
            } else {
                "ignored blank key or value".to_string()
            }
        }
        TrieCommand::Map => {
            let entries: Vec<String> = vis
                .map()
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            lines_or(&entries, "(empty map)")
        }
        TrieCommand::Clear => {
            vis.clear_all().await?;
            "cleared".to_string()
        }
        TrieCommand::Export => vis.export_json()?,
    };
    Ok(reply)
}

fn lines_or<T: AsRef<str>>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
}
