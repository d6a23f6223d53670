//! Core types, element trees, and utilities for the keycap graphics engine.
//!
//! This crate provides the foundational types used across the other keycap crates:
//! - `Expressible<T>` values (literal or expression)
//! - Authored graphics element trees and their resolved draw element mirror
//! - Feedback overrides and the used-variable set
//! - Error types

pub mod draw;
pub mod element;
pub mod errors;
pub mod expressible;
pub mod overrides;
pub mod types;

pub use draw::*;
pub use element::*;
pub use errors::*;
pub use expressible::*;
pub use overrides::*;
pub use types::*;

/// Dynamic value produced by expression evaluation and carried in overrides.
pub type VariableValue = serde_json::Value;
