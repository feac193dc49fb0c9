// File: src/messaging/merge.rs
use crate::core::scoring::{sort_by_score, truncate_positive_limit};
use crate::core::types::{Conversation, WordInfo};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// True when at least `threshold` keyword words appear in both conversations.
/// Only the words are compared; counts and scores are ignored.
/// A threshold of zero matches every pair.
pub fn has_common_keywords(left: &Conversation, right: &Conversation, threshold: usize) -> bool {
    if threshold == 0 {
        return true;
    }
    let left_words: HashSet<&str> = left.keywords.iter().map(|k| k.word.as_str()).collect();
    let mut shared = 0;
    for keyword in &right.keywords {
        if left_words.contains(keyword.word.as_str()) {
            shared += 1;
            if shared >= threshold {
                return true;
            }
        }
    }
    false
}

/// Fuses two conversations into a new one; neither input is modified.
///
/// Messages are concatenated left then right without re-sorting. Keywords are
/// unioned by word: a word on both sides gets the sum of the two counts and
/// the sum of the two scores, which is not recomputed against the frequency
/// context.
pub fn merge_pair(left: &Conversation, right: &Conversation, keyword_limit: i64) -> Conversation {
    let mut messages = Vec::with_capacity(left.messages.len() + right.messages.len());
    messages.extend_from_slice(&left.messages);
    messages.extend_from_slice(&right.messages);

    let mut by_word: HashMap<&str, WordInfo> = left
        .keywords
        .iter()
        .map(|k| (k.word.as_str(), k.clone()))
        .collect();
    for keyword in &right.keywords {
        by_word
            .entry(keyword.word.as_str())
            .and_modify(|existing| {
                existing.count += keyword.count;
                existing.score += keyword.score;
            })
            .or_insert_with(|| keyword.clone());
    }
    let mut keywords: Vec<WordInfo> = by_word.into_values().collect();
    sort_by_score(&mut keywords);
    truncate_positive_limit(&mut keywords, keyword_limit);

    Conversation {
        messages,
        start_timestamp_seconds: left.start_timestamp_seconds.min(right.start_timestamp_seconds),
        end_timestamp_seconds: left.end_timestamp_seconds.max(right.end_timestamp_seconds),
        num_words: left.num_words + right.num_words,
        num_non_stop_words: left.num_non_stop_words + right.num_non_stop_words,
        keywords,
    }
}

/// One left-to-right pass with a rolling accumulator.
///
/// Each conversation is compared against the accumulator, which already holds
/// everything merged so far in this pass, so chains like A-B then AB-C fuse in
/// a single pass. Returns the new sequence and whether any merge happened.
pub fn merge_pass(
    conversations: &[Conversation],
    threshold: usize,
    keyword_limit: i64,
) -> (Vec<Conversation>, bool) {
    let Some((first, rest)) = conversations.split_first() else {
        return (Vec::new(), false);
    };

    let mut merged_any = false;
    let mut output = Vec::with_capacity(conversations.len());
    let mut accumulator = first.clone();

    for next in rest {
        if has_common_keywords(&accumulator, next, threshold) {
            accumulator = merge_pair(&accumulator, next, keyword_limit);
            merged_any = true;
        } else {
            output.push(std::mem::replace(&mut accumulator, next.clone()));
        }
    }
    output.push(accumulator);

    (output, merged_any)
}

/// Repeats merge passes until a pass merges nothing. Relative order of the
/// surviving groups is preserved. O(n^2 * keyword_limit) in the worst case.
pub fn merge_conversations(
    conversations: Vec<Conversation>,
    threshold: usize,
    keyword_limit: i64,
) -> Vec<Conversation> {
    if conversations.len() < 2 {
        return conversations;
    }

    let mut current = conversations;
    let mut passes = 0usize;
    loop {
        let (next, merged_any) = merge_pass(&current, threshold, keyword_limit);
        passes += 1;
        trace!(pass = passes, before = current.len(), after = next.len(), "merge pass");
        current = next;
        if !merged_any {
            break;
        }
    }
    current
}
