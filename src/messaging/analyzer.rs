// File: src/messaging/analyzer.rs
use crate::core::engine::NlpEngine;
use crate::core::types::{Conversation, Message, MessageAnalysisContext};
use crate::error::Result;
use crate::messaging::bucket::bucketize;
use crate::messaging::merge::merge_conversations;
use tracing::{debug, instrument, warn};

/// Turns a window of chat messages into keyword-labelled conversations.
pub struct MessageAnalyzer<'a> {
    engine: &'a NlpEngine,
}

impl<'a> MessageAnalyzer<'a> {
    pub fn new(engine: &'a NlpEngine) -> Self {
        Self { engine }
    }

    /// Buckets the messages by time, merges drafts that share enough keywords,
    /// then drops conversations that are too small or have no keywords.
    #[instrument(skip_all, fields(messages = messages.len()))]
    pub fn merge_messages_and_compute_keywords(
        &self,
        messages: &[Message],
        context: &MessageAnalysisContext,
    ) -> Result<Vec<Conversation>> {
        if let Err(e) = context.validate() {
            warn!("Rejecting analysis request: {}", e);
            return Err(e);
        }

        // 1. Time buckets -> analyzed drafts
        let drafts = bucketize(self.engine, messages, context)?;
        debug!("Built {} draft conversations", drafts.len());

        // 2. Keyword-driven merging to a fixed point
        let merged = merge_conversations(
            drafts,
            context.common_keyword_threshold,
            context.keyword_limit,
        );
        debug!("{} conversations after merging", merged.len());

        // 3. Remove the conversations with too few messages or no keyword
        let result: Vec<Conversation> = merged
            .into_iter()
            .filter(|c| {
                c.message_count() >= context.min_messages_per_conversation && c.keyword_count() > 0
            })
            .collect();
        debug!("Returning {} conversations", result.len());

        Ok(result)
    }
}
