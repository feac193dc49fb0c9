// File: src/messaging/bucket.rs
use crate::core::engine::NlpEngine;
use crate::core::scoring::{count_tokens, score_keywords};
use crate::core::types::{Conversation, FrequencyContext, Message, MessageAnalysisContext};
use crate::error::Result;
use tracing::trace;

/// `floor(timestamp / bucket_seconds)`. Caller guarantees `bucket_seconds > 0`.
pub fn time_bucket_index(timestamp_seconds: i64, bucket_seconds: i64) -> i64 {
    timestamp_seconds.div_euclid(bucket_seconds)
}

/// Splits messages into draft conversations, one per run of equal time-bucket
/// index, and analyzes each draft as soon as it closes.
///
/// Messages are expected in non-decreasing timestamp order. They are never
/// re-sorted, so unsorted input yields one draft per contiguous run and the
/// same bucket can show up more than once.
pub fn bucketize(
    engine: &NlpEngine,
    messages: &[Message],
    context: &MessageAnalysisContext,
) -> Result<Vec<Conversation>> {
    context.validate()?;

    let mut drafts = Vec::new();
    let mut current: Option<(i64, Vec<Message>)> = None;

    for message in messages {
        let index = time_bucket_index(message.timestamp_seconds, context.time_bucket_seconds);
        if let Some((current_index, bucket)) = current.as_mut() {
            if *current_index == index {
                bucket.push(message.clone());
                continue;
            }
        }
        if let Some((closed_index, bucket)) = current.take() {
            trace!(bucket = closed_index, messages = bucket.len(), "closing draft");
            drafts.push(close_draft(engine, bucket, context));
        }
        current = Some((index, vec![message.clone()]));
    }

    // Handle the last one.
    if let Some((closed_index, bucket)) = current {
        trace!(bucket = closed_index, messages = bucket.len(), "closing draft");
        drafts.push(close_draft(engine, bucket, context));
    }

    Ok(drafts)
}

fn close_draft(engine: &NlpEngine, messages: Vec<Message>, context: &MessageAnalysisContext) -> Conversation {
    analyze_conversation(
        engine,
        Conversation::from_messages(messages),
        &context.frequency_context,
        context.keyword_limit,
    )
}

/// Fills in the time range, word statistics and keywords of a conversation.
/// An empty conversation comes back unchanged with all fields zero.
pub fn analyze_conversation(
    engine: &NlpEngine,
    conversation: Conversation,
    frequency_context: &FrequencyContext,
    keyword_limit: i64,
) -> Conversation {
    let (Some(start), Some(end)) = (
        conversation.messages.iter().map(|m| m.timestamp_seconds).min(),
        conversation.messages.iter().map(|m| m.timestamp_seconds).max(),
    ) else {
        return conversation;
    };

    let words: Vec<String> = conversation
        .messages
        .iter()
        .flat_map(|m| engine.segment(&m.content))
        .collect();
    let num_words = words.len() as u64;
    let content_words = engine.remove_stop_words(&words);
    let num_non_stop_words = content_words.len() as u64;
    let keywords = score_keywords(&count_tokens(&content_words), frequency_context, keyword_limit);

    Conversation {
        start_timestamp_seconds: start,
        end_timestamp_seconds: end,
        num_words,
        num_non_stop_words,
        keywords,
        ..conversation
    }
}
