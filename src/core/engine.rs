use crate::core::context::generate_context;
use crate::core::scoring::{count_tokens, rank_by_count, score_keywords};
use crate::core::segmenter::Segmenter;
use crate::core::stopwords::StopWordSet;
use crate::core::types::{FrequencyContext, WordInfo};
use crate::error::Result;
use std::collections::HashMap;

// The engine owns the process-wide state: the segmenter and the stop words.
// Both are loaded once and only read afterwards, so `&NlpEngine` can be
// shared freely across threads.
pub struct NlpEngine {
    segmenter: Box<dyn Segmenter>,
    stop_words: StopWordSet,
}

impl NlpEngine {
    pub fn new(segmenter: Box<dyn Segmenter>) -> Self {
        Self { segmenter, stop_words: StopWordSet::new() }
    }

    pub fn with_stop_words(segmenter: Box<dyn Segmenter>, stop_words: StopWordSet) -> Self {
        Self { segmenter, stop_words }
    }

    pub fn add_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words.add(words);
    }

    pub fn clear_stop_words(&mut self) {
        self.stop_words.clear();
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    pub fn segment_texts(&self, texts: &[String]) -> Vec<String> {
        self.segmenter.segment_all(texts)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Returns the words that are not stop words. The input is left untouched.
    pub fn remove_stop_words(&self, words: &[String]) -> Vec<String> {
        words
            .iter()
            .filter(|word| !self.is_stop_word(word))
            .cloned()
            .collect()
    }

    /// Segments the texts and ranks the distinct words by how often they occur.
    pub fn count_words(&self, texts: &[String], count_stop_words: bool, limit: i64) -> Vec<WordInfo> {
        let mut words = self.segment_texts(texts);
        if !count_stop_words {
            words = self.remove_stop_words(&words);
        }
        rank_by_count(count_tokens(&words), limit)
    }

    /// Scores the given words against a frequency context. Stop words are not removed here.
    pub fn keyword_info(&self, words: &[String], context: &FrequencyContext, limit: i64) -> Vec<WordInfo> {
        score_keywords(&count_tokens(words), context, limit)
    }

    pub fn generate_context(&self, global_word_count: &HashMap<String, u64>) -> Result<FrequencyContext> {
        generate_context(global_word_count)
    }
}
