pub mod config;
pub mod helpers;
pub mod kv_store;
pub mod slack;
pub mod summarize;
pub mod summarizer;
pub mod youtube;
