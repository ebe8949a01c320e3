//! Core logic for foreman: the LLM project-plan pipeline.
//!
//! `ollama` talks to a local model server; `plan` turns requirements plus a
//! team roster into a prompt, recovers JSON from the model's free-text
//! output, and validates it into a [`plan::ProjectPlan`].

pub mod ollama;
pub mod plan;
