//! Core types for the Tide usage analytics engine.
//!
//! Identifiers, labelled tables, result payloads, calendar periods and the
//! runtime settings shared by every other crate. This crate knows nothing
//! about header syntax or how analyses are resolved.

pub mod error;
pub mod filter;
pub mod identifier;
pub mod label;
pub mod period;
pub mod resource;
pub mod settings;
pub mod table;

pub use error::{Error, Result};
