pub mod candidate;
pub mod config;
pub mod dedup;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod publisher;
pub mod scoring;
