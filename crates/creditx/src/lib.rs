//! Mortgage pre-qualification for the Swiss market.
//!
//! The [`workflows::mortgage`] module owns the feasibility rules and the application wizard;
//! [`workflows::assistant`] wraps the language-model helpers used while filling it in.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
