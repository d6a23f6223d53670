//! Text layout for keycap text elements.
//!
//! This crate turns a string into lines that fit a fixed pixel box.
//!
//! # Architecture
//!
//! 1. **Segmentation**: split text into grapheme clusters, capped at a maximum count
//! 2. **Font sizing**: pick the candidate pixel sizes to try
//! 3. **Line breaking**: wrap clusters into lines for one size, reporting whether all text fit
//!
//! Text measurement is injected through [`TextMeasurer`], so the same code runs
//! against a real font rasterizer or the [`EstimatedMeasurer`].
//!
//! # Example
//!
//! ```ignore
//! use keycap_text::{fit_text, EstimatedMeasurer, TextLayoutOptions};
//!
//! let layout = fit_text(&EstimatedMeasurer::default(), 72.0, 72.0, "Hello world",
//!     FontSize::Auto, &TextLayoutOptions::default());
//! for line in &layout.lines {
//!     println!("{}", line.text);
//! }
//! ```

mod fit;
mod font_size;
mod line_break;
mod measure;
mod segment;

pub use fit::{fit_text, TextLayoutOptions};
pub use font_size::{candidate_font_sizes, FontSizeCandidates, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use line_break::{compute_text_layout, TextLayout, TextLine};
pub use measure::{EstimatedMeasurer, TextMeasurer, TextMetrics};
pub use segment::{segment_text, SegmentedText};
