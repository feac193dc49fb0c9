// File: src/core/scoring.rs
use crate::core::types::{FrequencyContext, WordInfo};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Counts occurrences of each distinct token. Tokens compare case-sensitively.
pub fn count_tokens<I, S>(tokens: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for token in tokens {
        let token = token.as_ref();
        if let Some(count) = counts.get_mut(token) {
            *count += 1;
        } else {
            counts.insert(token.to_string(), 1);
        }
    }
    counts
}

/// Scores every locally counted word against the frequency context.
///
/// With a weighted context `score = count * idf`, where `idf` is the
/// precomputed global score or, for a word the corpus never saw,
/// `ln(num_all_words / count)`. Without one `score = count`.
/// Result is sorted by score descending; `limit <= 0` keeps everything.
pub fn score_keywords(
    local_counts: &HashMap<String, u64>,
    context: &FrequencyContext,
    limit: i64,
) -> Vec<WordInfo> {
    let mut keywords: Vec<WordInfo> = local_counts
        .iter()
        .map(|(word, &count)| {
            let mut score = count as f64;
            if context.is_weighted() {
                let idf = match context.global_stats.get(word) {
                    Some(global) => global.score,
                    None => (context.num_all_words as f64 / count as f64).ln(),
                };
                score *= idf;
            }
            WordInfo::new(word.clone(), count, score)
        })
        .collect();

    sort_by_score(&mut keywords);
    truncate_positive_limit(&mut keywords, limit);
    keywords
}

/// Ranks raw counts, highest first. Scores are left at zero.
/// A negative limit keeps everything; otherwise at most `limit` entries survive.
pub fn rank_by_count(counts: HashMap<String, u64>, limit: i64) -> Vec<WordInfo> {
    let mut ranked: Vec<WordInfo> = counts
        .into_iter()
        .map(|(word, count)| WordInfo::new(word, count, 0.0))
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    if let Ok(limit) = usize::try_from(limit) {
        ranked.truncate(limit);
    }
    ranked
}

/// Score descending, ties broken by word ascending so output never depends
/// on hash-map iteration order.
pub fn sort_by_score(words: &mut [WordInfo]) {
    words.sort_by(compare_by_score);
}

fn compare_by_score(a: &WordInfo, b: &WordInfo) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.word.cmp(&b.word))
}

/// Keyword limits treat zero and negatives as "no limit".
pub fn truncate_positive_limit(words: &mut Vec<WordInfo>, limit: i64) {
    if limit > 0 {
        if let Ok(limit) = usize::try_from(limit) {
            words.truncate(limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::generate_context;

    fn sample_context() -> FrequencyContext {
        let counts = HashMap::from([("a".to_string(), 100), ("c".to_string(), 10)]);
        generate_context(&counts).unwrap()
    }

    fn words() -> HashMap<String, u64> {
        count_tokens(["a", "a", "a", "b", "b", "c"])
    }

    #[test]
    fn test_weighted_scores_and_unseen_fallback() {
        let result = score_keywords(&words(), &sample_context(), 4);
        let expected = vec![
            WordInfo::new("b", 2, 2.0 * (110.0f64 / 2.0).ln()),
            WordInfo::new("c", 1, 1.0 * (110.0f64 / 10.0).ln()),
            WordInfo::new("a", 3, 3.0 * (110.0f64 / 100.0).ln()),
        ];
        assert_eq!(result.len(), expected.len());
        for (got, want) in result.iter().zip(&expected) {
            assert_eq!(got.word, want.word);
            assert_eq!(got.count, want.count);
            assert!((got.score - want.score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_keyword_limits() {
        let context = sample_context();
        assert_eq!(score_keywords(&words(), &context, 0).len(), 3);
        assert_eq!(score_keywords(&words(), &context, -7).len(), 3);
        let top_two = score_keywords(&words(), &context, 2);
        let names: Vec<&str> = top_two.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_unweighted_scores_equal_counts() {
        let result = score_keywords(&words(), &FrequencyContext::empty(), 0);
        assert_eq!(
            result,
            vec![
                WordInfo::new("a", 3, 3.0),
                WordInfo::new("b", 2, 2.0),
                WordInfo::new("c", 1, 1.0),
            ]
        );
    }

    #[test]
    fn test_ties_break_on_word() {
        let counts = count_tokens(["d", "b", "c", "a"]);
        let result = score_keywords(&counts, &FrequencyContext::empty(), 0);
        let names: Vec<&str> = result.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_rank_by_count_limits() {
        let counts = count_tokens(["x", "y", "y", "z", "z", "z"]);
        assert!(rank_by_count(counts.clone(), 0).is_empty());
        assert_eq!(rank_by_count(counts.clone(), -1).len(), 3);
        assert_eq!(rank_by_count(counts.clone(), 100).len(), 3);
        let top = rank_by_count(counts, 2);
        assert_eq!(top, vec![WordInfo::new("z", 3, 0.0), WordInfo::new("y", 2, 0.0)]);
    }

    #[test]
    fn test_context_round_trip() {
        let corpus = HashMap::from([
            ("rust".to_string(), 7u64),
            ("borrow".to_string(), 3),
            ("trait".to_string(), 11),
        ]);
        let context = generate_context(&corpus).unwrap();
        let n = context.num_all_words as f64;
        for info in score_keywords(&corpus, &context, 0) {
            let c = info.count as f64;
            assert!((info.score - c * (n / c).ln()).abs() < 1e-9);
        }
    }
}
