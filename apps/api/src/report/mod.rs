// Report generation: prompt construction, model calls, single-field merges,
// and the static mapping between student data and report sections.
// All LLM calls go through llm_client::TextGenerator.

pub mod catalog;
pub mod generator;
pub mod handlers;
pub mod merge;
pub mod prompts;
