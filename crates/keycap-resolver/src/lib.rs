//! Resolution of keycap element trees into draw elements.
//!
//! Authored elements carry properties that are either literal values or
//! expressions over variables. This crate evaluates them against the
//! current variable state and produces a concrete draw tree.
//!
//! # Architecture
//!
//! 1. **Capabilities**: expression evaluation and pixel buffer decoding are injected traits
//! 2. **Property resolution**: one accessor per property type, applying feedback overrides
//! 3. **Tree resolution**: walk the element tree, skip disabled subtrees, collect used variables
//!
//! # Example
//!
//! ```ignore
//! use keycap_resolver::{resolve_elements, NoPixelBufferDecoder, ResolveOptions};
//!
//! let resolved = resolve_elements(&elements, &overrides, &evaluator,
//!     &NoPixelBufferDecoder, ResolveOptions::default()).await;
//! for element in &resolved.elements {
//!     println!("{}", element.id());
//! }
//! ```

mod capabilities;
mod property;
mod tree;

#[cfg(test)]
mod testing;

pub use capabilities::{
    ExecuteResult, ExpressionEvaluator, ExpressionType, NoPixelBufferDecoder, ParsedText,
    PixelBufferDecoder, PixelBufferDescriptor,
};
pub use property::{PropertyResolver, SUBSTITUTION_ERROR_TEXT};
pub use tree::{resolve_elements, ResolveOptions, ResolvedElements};
