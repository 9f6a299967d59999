//! Report analysis via the external text-completion service

pub mod analyzer;
pub mod client;

pub use client::{AnalysisError, ChatClient};
