// File: src/core/mod.rs
pub mod context;
pub mod engine;
pub mod scoring;
pub mod segmenter;
pub mod stopwords;
pub mod trie;
pub mod types;
