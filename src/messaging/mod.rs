// File: src/messaging/mod.rs
pub mod analyzer;
pub mod bucket;
pub mod merge;
