// File: src/wordlist.rs
use crate::core::stopwords::StopWordSet;
use crate::core::trie::LexiconTrie;
use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Reads one word per line. Surrounding whitespace is trimmed and blank lines are skipped.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

pub fn load_stop_words<P: AsRef<Path>>(paths: &[P]) -> Result<StopWordSet> {
    let mut stop_words = StopWordSet::new();
    for path in paths {
        let path = path.as_ref();
        let words = load_word_list(path)?;
        info!("Loaded {} stop words from {}", words.len(), path.display());
        stop_words.add(words);
    }
    Ok(stop_words)
}

pub fn load_lexicon<P: AsRef<Path>>(paths: &[P]) -> Result<LexiconTrie> {
    let mut lexicon = LexiconTrie::new();
    for path in paths {
        let path = path.as_ref();
        let words = load_word_list(path)?;
        info!("Loaded {} lexicon entries from {}", words.len(), path.display());
        for word in &words {
            lexicon.insert(word);
        }
    }
    Ok(lexicon)
}
