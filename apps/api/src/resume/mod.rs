// Resume generation from a free-text experience description.
// All Gemini calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod template;
