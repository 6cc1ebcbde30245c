//! Integration tests for the input parsers
//!
//! Tests for two-word commands, synonyms and question answers.

mod answers;
mod commands;
