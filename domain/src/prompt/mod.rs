//! Prompt domain
//!
//! Templates for generating prompts at each stage of a debate run.

mod template;

pub use template::PromptTemplate;
