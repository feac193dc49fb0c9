// File: src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A word together with its raw count and relevance score.
/// Used both for plain frequency observations and for scored keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub count: u64,
    #[serde(default)]
    pub score: f64,
}

impl WordInfo {
    pub fn new(word: impl Into<String>, count: u64, score: f64) -> Self {
        Self { word: word.into(), count, score }
    }
}

/// Corpus-wide statistics used to weight local counts by rarity.
/// `global_stats[w].score` holds `ln(num_all_words / count_w)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyContext {
    pub num_all_words: u64,
    pub global_stats: HashMap<String, WordInfo>,
}

impl FrequencyContext {
    /// A context with no corpus behind it. Scoring degenerates to raw counts.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_weighted(&self) -> bool {
        self.num_all_words > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub timestamp_seconds: i64,
    #[serde(default)]
    pub from_user_id: String,
    #[serde(default)]
    pub to_user_id: String,
    pub content: String,
}

impl Message {
    pub fn new(
        id: i64,
        timestamp_seconds: i64,
        from_user_id: &str,
        to_user_id: &str,
        content: &str,
    ) -> Self {
        Self {
            id,
            timestamp_seconds,
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            content: content.to_string(),
        }
    }
}

/// A group of messages with its time range, word statistics and ranked keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub start_timestamp_seconds: i64,
    pub end_timestamp_seconds: i64,
    pub num_words: u64,
    pub num_non_stop_words: u64,
    pub keywords: Vec<WordInfo>,
}

impl Conversation {
    /// A draft holding only messages; every derived field is still zero.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages, ..Self::default() }
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

fn default_common_keyword_threshold() -> usize {
    1
}

fn default_min_messages() -> usize {
    1
}

/// Knobs for one `merge_messages_and_compute_keywords` invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysisContext {
    #[serde(default)]
    pub frequency_context: FrequencyContext,
    pub time_bucket_seconds: i64,
    #[serde(default = "default_common_keyword_threshold")]
    pub common_keyword_threshold: usize,
    /// Zero or negative means unlimited.
    #[serde(default)]
    pub keyword_limit: i64,
    #[serde(default = "default_min_messages")]
    pub min_messages_per_conversation: usize,
}

impl MessageAnalysisContext {
    pub fn new(frequency_context: FrequencyContext, time_bucket_seconds: i64) -> Self {
        Self {
            frequency_context,
            time_bucket_seconds,
            common_keyword_threshold: default_common_keyword_threshold(),
            keyword_limit: 0,
            min_messages_per_conversation: default_min_messages(),
        }
    }

    pub fn with_common_keyword_threshold(mut self, threshold: usize) -> Self {
        self.common_keyword_threshold = threshold;
        self
    }

    pub fn with_keyword_limit(mut self, limit: i64) -> Self {
        self.keyword_limit = limit;
        self
    }

    pub fn with_min_messages_per_conversation(mut self, min: usize) -> Self {
        self.min_messages_per_conversation = min;
        self
    }

    /// Rejects settings that would make bucketing meaningless.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.time_bucket_seconds <= 0 {
            return Err(crate::error::NlpError::InvalidConfig(format!(
                "time_bucket_seconds must be positive, got {}",
                self.time_bucket_seconds
            )));
        }
        Ok(())
    }
}
