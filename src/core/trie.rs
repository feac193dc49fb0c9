// --- File: src/core/trie.rs
use std::collections::HashMap;

#[derive(Clone, Debug)]
struct LexiconNode {
    children: HashMap<char, usize>,
    is_word: bool,
}

impl LexiconNode {
    fn new() -> Self {
        Self { children: HashMap::new(), is_word: false }
    }
}

/// An arena-backed character trie of dictionary words.
/// Used by the lexicon segmenter for forward maximum matching.
#[derive(Clone, Debug)]
pub struct LexiconTrie {
    nodes: Vec<LexiconNode>,
    word_count: usize,
}

impl Default for LexiconTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTrie {
    pub fn new() -> Self {
        Self { nodes: vec![LexiconNode::new()], word_count: 0 }
    }

    /// Inserts a dictionary word. O(k) where k is the word length in chars.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut node_idx = 0;
        for ch in word.chars() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&ch) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(LexiconNode::new());
                self.nodes[node_idx].children.insert(ch, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
        }
        if !self.nodes[node_idx].is_word {
            self.nodes[node_idx].is_word = true;
            self.word_count += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        let mut node_idx = 0;
        for ch in word.chars() {
            match self.nodes[node_idx].children.get(&ch) {
                Some(&next_idx) => node_idx = next_idx,
                None => return false,
            }
        }
        self.nodes[node_idx].is_word
    }

    /// Length in chars of the longest dictionary word that starts at `chars[start]`.
    /// O(m) where m is the length of the longest dictionary path walked.
    pub fn longest_match(&self, chars: &[char], start: usize) -> Option<usize> {
        let mut node_idx = 0;
        let mut best = None;
        for (offset, ch) in chars[start..].iter().enumerate() {
            match self.nodes[node_idx].children.get(ch) {
                Some(&next_idx) => node_idx = next_idx,
                None => break,
            }
            if self.nodes[node_idx].is_word {
                best = Some(offset + 1);
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

impl<S: AsRef<str>> FromIterator<S> for LexiconTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        for word in iter {
            trie.insert(word.as_ref());
        }
        trie
    }
}
