use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::store::{Snapshot, SnapshotStore, StoreError};
use crate::trie::Trie;

/// Holds the state behind the maps and tries page: the trie engine, the list
/// of words shown next to it, and a free-form key-value map.
///
/// State is read from the store once in [`TrieVisualizer::load`] and only
/// written back by [`TrieVisualizer::save`] and [`TrieVisualizer::clear_all`].
#[derive(Debug)]
pub struct TrieVisualizer<S> {
    trie: Trie,
    words: IndexSet<String>,
    map: IndexMap<String, String>,
    suggestions: Vec<String>,
    highlight_path: Vec<char>,
    last_result: Option<bool>,
    store: S,
}

impl<S: SnapshotStore> TrieVisualizer<S> {
    /// Restores the word list and map from `store` and rebuilds the trie.
    pub async fn load(store: S) -> Result<Self, StoreError> {
        let Snapshot { map, trie_words } = store.load().await?;
        let words: IndexSet<String> = trie_words.into_iter().collect();
        let trie: Trie = words.iter().collect();
        info!(
            "Loaded {} words and {} map entries",
            words.len(),
            map.len()
        );

        Ok(Self {
            trie,
            words,
            map,
            suggestions: Vec::new(),
            highlight_path: Vec::new(),
            last_result: None,
            store,
        })
    }

    /// Adds `input` to the trie. Blank input is ignored.
    pub fn insert(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            debug!("Ignoring blank word");
            return false;
        }
        self.trie.insert(input);
        self.words.insert(input.to_string());
        self.last_result = None;
        true
    }

    /// Looks `input` up, remembering the result and the matched path.
    pub fn search(&mut self, input: &str) -> bool {
        let found = self.trie.search(input);
        self.last_result = Some(found);
        self.highlight_path = self.trie.path(input);
        debug!("Search {:?}: {} (path {:?})", input, found, self.highlight_path);
        found
    }

    /// Removes `input` from the trie and the word list.
    pub fn delete(&mut self, input: &str) -> bool {
        let removed = self.trie.delete(input);
        self.words.shift_remove(input);
        self.last_result = None;
        if removed {
            info!("Deleted {:?}", input);
        }
        removed
    }

    /// Recomputes the suggestions for what the user has typed so far.
    pub fn autocomplete(&mut self, input: &str) -> &[String] {
        self.suggestions = if input.is_empty() {
            Vec::new()
        } else {
            self.trie.suggestions(input)
        };
        &self.suggestions
    }

    pub fn path(&self, input: &str) -> Vec<char> {
        self.trie.path(input)
    }

    /// Stores `value` under `key`. Both must be non-blank.
    pub fn put(&mut self, key: &str, value: &str) -> bool {
        if key.trim().is_empty() || value.trim().is_empty() {
            debug!("Ignoring map entry with blank key or value");
            return false;
        }
        self.map.insert(key.to_string(), value.to_string());
        true
    }

    /// Clears the store, then empties the map, the word list and the trie.
    /// Nothing in memory changes if the store cannot be cleared.
    pub async fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.clear().await?;
        self.map.clear();
        self.words.clear();
        self.trie.clear();
        self.suggestions.clear();
        self.highlight_path.clear();
        self.last_result = None;
        info!("Cleared all words and map entries");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            map: self.map.clone(),
            trie_words: self.words.iter().cloned().collect(),
        }
    }

    /// The map and word list as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.snapshot()).await
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn map(&self) -> &IndexMap<String, String> {
        &self.map
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlight_path(&self) -> &[char] {
        &self.highlight_path
    }

    /// Outcome of the last search, reset by any change to the word set.
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}
