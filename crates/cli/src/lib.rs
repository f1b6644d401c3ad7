//! Command-line front end: JSON files in, JSON out.
//!
//! Owns everything the engine deliberately does not: argument and environment
//! parsing, file IO, JSON envelopes and the planning date.

pub mod args;
pub mod commands;
pub mod dto;
pub mod input;
