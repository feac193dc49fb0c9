// File: src/core/context.rs
use crate::core::types::{FrequencyContext, WordInfo};
use crate::error::{NlpError, Result};
use std::collections::HashMap;

/// Builds a frequency context from aggregate corpus counts.
///
/// `num_all_words` is the sum of all counts and every word gets
/// `score = ln(num_all_words / count)`. A zero count has no defined score
/// and is rejected.
pub fn generate_context(global_word_count: &HashMap<String, u64>) -> Result<FrequencyContext> {
    if let Some((word, _)) = global_word_count.iter().find(|(_, count)| **count == 0) {
        return Err(NlpError::ZeroWordCount { word: word.clone() });
    }

    let num_all_words: u64 = global_word_count.values().sum();
    let global_stats = global_word_count
        .iter()
        .map(|(word, &count)| {
            let score = (num_all_words as f64 / count as f64).ln();
            (word.clone(), WordInfo::new(word.clone(), count, score))
        })
        .collect();

    Ok(FrequencyContext { num_all_words, global_stats })
}
