//! Skill and certification extraction.
//!
//! `rule_based` is the deterministic engine built from `vocabulary`, `matcher`,
//! `experience` and `inference`. `ai` calls the language model with the prompt
//! from `prompts`. `strategy` picks between them per request.

pub mod ai;
pub mod error;
pub mod experience;
pub mod handlers;
pub mod inference;
pub mod matcher;
pub mod prompts;
pub mod rule_based;
pub mod strategy;
pub mod vocabulary;
