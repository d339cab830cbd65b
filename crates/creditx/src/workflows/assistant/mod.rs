//! Model-backed helpers for the wizard: property value estimation and document OCR.
//!
//! The model is treated as an opaque text oracle. Replies are free text; the first JSON
//! object found in them is the answer, and a reply without one is an error rather than an
//! empty result.

pub mod client;
pub mod documents;
pub mod error;
pub mod extract;
mod prompts;
pub mod router;
pub mod service;
pub mod valuation;

pub use client::{CompletionClient, CompletionRequest, OpenAiClient};
pub use documents::{DocumentReviewRequest, DocumentValidation};
pub use error::AssistantError;
pub use extract::{extract_json_object, parse_model_json};
pub use router::assistant_router;
pub use service::AssistantService;
pub use valuation::PropertyEstimate;
