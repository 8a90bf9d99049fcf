pub mod retry;
pub mod summaries;
pub mod transcripts;
