use indexmap::IndexMap;

const ROOT: usize = 0;

/// A node in the prefix tree
#[derive(Debug, Default, Clone)]
struct TrieNode {
    // Whether this node represents the end of a word
    is_end_of_word: bool,
    // Child node indices keyed by character, in the order they were created
    children: IndexMap<char, usize>,
}

/// A prefix tree over `char`s.
///
/// Nodes live in an arena owned by the trie; index `0` is the root, which
/// stands for the empty prefix. Pruned nodes are recycled through a free
/// list.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    free: Vec<usize>,
    word_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates a new, empty prefix tree
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::default()],
            free: Vec::new(),
            word_count: 0,
        }
    }

    /// Inserts a word, returning `false` if it was already present.
    ///
    /// Inserting the empty string marks the root.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut current = ROOT;
        for c in word.chars() {
            current = match self.nodes[current].children.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.alloc();
                    self.nodes[current].children.insert(c, next);
                    next
                }
            };
        }

        let node = &mut self.nodes[current];
        if node.is_end_of_word {
            return false;
        }
        node.is_end_of_word = true;
        self.word_count += 1;
        true
    }

    /// Returns `true` only for stored words, not for bare prefixes.
    pub fn search(&self, word: &str) -> bool {
        self.follow(word)
            .is_some_and(|idx| self.nodes[idx].is_end_of_word)
    }

    /// Returns `true` if any stored word starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.follow(prefix).is_some()
    }

    /// Removes a word, returning `true` if it was present.
    ///
    /// Nodes left with no children and no word ending are pruned bottom-up,
    /// stopping at the first ancestor another word still needs. The root is
    /// never pruned.
    pub fn delete(&mut self, word: &str) -> bool {
        let mut current = ROOT;
        let mut path = Vec::new();
        for c in word.chars() {
            let Some(&next) = self.nodes[current].children.get(&c) else {
                return false;
            };
            path.push((current, c, next));
            current = next;
        }

        if !self.nodes[current].is_end_of_word {
            return false;
        }
        self.nodes[current].is_end_of_word = false;
        self.word_count -= 1;

        while let Some((parent, c, child)) = path.pop() {
            let node = &self.nodes[child];
            if node.is_end_of_word || !node.children.is_empty() {
                break;
            }
            self.nodes[parent].children.shift_remove(&c);
            self.recycle(child);
        }

        true
    }

    /// Returns every stored word starting with `prefix`.
    ///
    /// Words come out depth-first, siblings in the order their first
    /// character was inserted. The result is not sorted.
    pub fn suggestions(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let Some(start) = self.follow(prefix) else {
            return results;
        };

        let mut stack = vec![(start, prefix.to_string())];
        while let Some((idx, word)) = stack.pop() {
            let node = &self.nodes[idx];
            if node.is_end_of_word {
                results.push(word.clone());
            }
            // Pushed in reverse so the first child is expanded first.
            for (&c, &child) in node.children.iter().rev() {
                let mut next = word.clone();
                next.push(c);
                stack.push((child, next));
            }
        }
        results
    }

    /// Returns the characters of `word` that can be followed from the root,
    /// stopping at the first one with no matching edge.
    pub fn path(&self, word: &str) -> Vec<char> {
        let mut current = ROOT;
        let mut path = Vec::new();
        for c in word.chars() {
            let Some(&next) = self.nodes[current].children.get(&c) else {
                break;
            };
            path.push(c);
            current = next;
        }
        path
    }

    /// All stored words, in the same order as [`Trie::suggestions`].
    pub fn words(&self) -> Vec<String> {
        self.suggestions("")
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn follow(&self, prefix: &str) -> Option<usize> {
        let mut current = ROOT;
        for c in prefix.chars() {
            current = *self.nodes[current].children.get(&c)?;
        }
        Some(current)
    }

    fn alloc(&mut self) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = TrieNode::default();
                idx
            }
            None => {
                self.nodes.push(TrieNode::default());
                self.nodes.len() - 1
            }
        }
    }

    fn recycle(&mut self, idx: usize) {
        self.nodes[idx].children.clear();
        self.free.push(idx);
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_versus_prefix() {
        let mut trie = Trie::new();
        trie.insert("cat");

        assert!(!trie.search("ca"));
        assert!(trie.search("cat"));
        assert!(!trie.search("cats"));
        assert!(trie.starts_with("ca"));
        assert!(trie.suggestions("ca").contains(&"cat".to_string()));
    }

    #[test]
    fn test_delete_prunes_only_dead_branch() {
        let mut trie = Trie::new();
        trie.insert("cat");
        trie.insert("car");
        assert_eq!(trie.node_count(), 5);

        assert!(trie.delete("cat"));
        assert!(!trie.search("cat"));
        assert!(trie.search("car"));
        // 'a' is shared with "car" and stays; 't' is gone.
        assert!(trie.starts_with("ca"));
        assert!(!trie.starts_with("cat"));
        assert_eq!(trie.node_count(), 4);
        assert_eq!(trie.suggestions("ca"), vec!["car"]);
    }

    #[test]
    fn test_delete_keeps_word_that_is_a_prefix() {
        let mut trie: Trie = ["car", "cart"].into_iter().collect();

        assert!(trie.delete("cart"));
        assert!(trie.search("car"));
        assert_eq!(trie.node_count(), 4);

        assert!(trie.delete("car"));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_delete_inner_word_keeps_children() {
        let mut trie: Trie = ["car", "cart"].into_iter().collect();

        assert!(trie.delete("car"));
        assert!(!trie.search("car"));
        assert!(trie.search("cart"));
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut trie: Trie = ["cat"].into_iter().collect();

        assert!(!trie.delete("ca"));
        assert!(!trie.delete("dog"));
        assert!(!trie.delete("cats"));
        assert!(trie.search("cat"));
        assert_eq!(trie.node_count(), 4);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = Trie::new();
        assert!(trie.insert("tree"));
        let nodes = trie.node_count();

        assert!(!trie.insert("tree"));
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.words(), vec!["tree"]);
    }

    #[test]
    fn test_empty_string_marks_root() {
        let mut trie = Trie::new();
        assert!(!trie.search(""));

        trie.insert("");
        trie.insert("a");
        assert!(trie.search(""));
        assert_eq!(trie.words(), vec!["", "a"]);

        assert!(trie.delete(""));
        assert!(!trie.search(""));
        assert!(trie.search("a"));
    }

    #[test]
    fn test_suggestions_follow_child_insertion_order() {
        let trie: Trie = ["tea", "ten", "to", "ted", "te"].into_iter().collect();

        assert_eq!(trie.suggestions("t"), vec!["te", "tea", "ten", "ted", "to"]);
        assert_eq!(trie.suggestions("te"), vec!["te", "tea", "ten", "ted"]);
        assert!(trie.suggestions("x").is_empty());
    }

    #[test]
    fn test_suggestions_do_not_surface_deleted_words() {
        let mut trie: Trie = ["card", "care"].into_iter().collect();
        trie.delete("card");
        trie.insert("cards");

        assert_eq!(trie.suggestions("car"), vec!["care", "cards"]);
    }

    #[test]
    fn test_recycled_nodes_start_clean() {
        let mut trie: Trie = ["abc"].into_iter().collect();
        trie.delete("abc");
        trie.insert("xy");

        assert_eq!(trie.node_count(), 3);
        assert_eq!(trie.words(), vec!["xy"]);
        assert!(!trie.starts_with("a"));
    }

    #[test]
    fn test_path_stops_at_mismatch() {
        let trie: Trie = ["hello"].into_iter().collect();

        assert_eq!(trie.path("help"), vec!['h', 'e', 'l']);
        assert_eq!(trie.path("hello"), vec!['h', 'e', 'l', 'l', 'o']);
        assert!(trie.path("yo").is_empty());
    }

    #[test]
    fn test_unicode_words() {
        let mut trie = Trie::new();
        trie.insert("na\u{00EF}ve");
        trie.insert("\u{1F980}rust");

        assert!(trie.search("na\u{00EF}ve"));
        assert_eq!(trie.path("na\u{00EF}x"), vec!['n', 'a', '\u{00EF}']);
        assert_eq!(trie.suggestions("\u{1F980}"), vec!["\u{1F980}rust"]);
    }

    #[test]
    fn test_clear() {
        let mut trie: Trie = ["a", "b"].into_iter().collect();
        trie.clear();

        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(trie.words().is_empty());
    }
}
