// src/lib.rs

pub mod core;
pub mod error;
pub mod messaging;
pub mod wordlist;

pub use crate::core::context::generate_context;
pub use crate::core::engine::NlpEngine;
pub use crate::core::segmenter::{LexiconSegmenter, Segmenter, WhitespaceSegmenter};
pub use crate::core::stopwords::StopWordSet;
pub use crate::core::types::{
    Conversation, FrequencyContext, Message, MessageAnalysisContext, WordInfo,
};
pub use crate::error::{NlpError, Result};
pub use crate::messaging::analyzer::MessageAnalyzer;
