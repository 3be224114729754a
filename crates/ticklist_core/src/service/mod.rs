//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, store mutation and persistence into the API
//!   the presentation layer calls.
//! - Keep callers decoupled from storage and clock details.

pub mod todo_service;
