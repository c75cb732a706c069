//! # Courseflow Advisor
//!
//! Turns the assignments digest into a study plan by calling an
//! OpenAI-compatible chat-completions endpoint with a strict output-schema
//! instruction. The schema contract is the model's problem; this crate
//! only serializes the digest in and parses the structured result out.

mod client;
mod prompt;

pub use client::AdvisorClient;
pub use prompt::{build_prompt, plan_schema, schema_instruction, strip_code_fences};
