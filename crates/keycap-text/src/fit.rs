//! Auto-sizing: try candidate font sizes until the text fits.

use crate::font_size::candidate_font_sizes;
use crate::line_break::{compute_text_layout, TextLayout};
use crate::measure::TextMeasurer;
use crate::segment::segment_text;
use keycap_core::FontSize;
use tracing::debug;

/// Text layout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayoutOptions {
    /// Font family appended to every font descriptor.
    pub font_family: String,
    /// Maximum number of grapheme clusters laid out; the rest is cut off.
    pub max_chars: usize,
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            max_chars: 300,
        }
    }
}

impl TextLayoutOptions {
    /// Font descriptor for a pixel size, e.g. `"14px sans-serif"`.
    pub fn font_descriptor(&self, size: f64) -> String {
        format!("{size}px {}", self.font_family)
    }
}

/// Lay out `text` in a `width` x `height` box, shrinking the font until it fits.
///
/// Returns the layout for the first candidate size that fits, or for the
/// smallest candidate when none does.
pub fn fit_text<M: TextMeasurer + ?Sized>(
    measurer: &M,
    width: f64,
    height: f64,
    text: &str,
    font_size: FontSize,
    options: &TextLayoutOptions,
) -> TextLayout {
    let segmented = segment_text(text, options.max_chars);
    if segmented.truncated {
        debug!(max_chars = options.max_chars, "text truncated before layout");
    }

    let candidates = candidate_font_sizes(font_size, width, height, segmented.chars.len());
    let layout_at = |size: f64| {
        let font = options.font_descriptor(size);
        compute_text_layout(measurer, width, height, &segmented.chars, &font)
    };

    // Never empty: a fixed size yields one candidate, auto a whole list.
    let mut layout = layout_at(candidates[0]);
    for &size in &candidates[1..] {
        if layout.fits {
            return layout;
        }
        layout = layout_at(size);
    }

    if !layout.fits {
        debug!(width, height, "text does not fit at any candidate size");
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::EstimatedMeasurer;

    fn texts(layout: &TextLayout) -> Vec<&str> {
        layout.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_short_text_gets_large_font() {
        let layout = fit_text(
            &EstimatedMeasurer::default(),
            72.0,
            72.0,
            "Hi",
            FontSize::Auto,
            &TextLayoutOptions::default(),
        );
        // 2 * 60 * 0.55 = 66px wide, 60px tall
        assert_eq!(layout.font, "60px sans-serif");
        assert_eq!(texts(&layout), vec!["Hi"]);
        assert!(layout.fits);
    }

    #[test]
    fn test_shrinks_until_fit() {
        let layout = fit_text(
            &EstimatedMeasurer::default(),
            72.0,
            72.0,
            "Hello",
            FontSize::Auto,
            &TextLayoutOptions::default(),
        );
        // Only two characters per line fit down to 44px, leaving room for one line.
        assert!(layout.fits);
        assert_eq!(layout.font, "31px sans-serif");
        assert_eq!(texts(&layout), vec!["Hell", "o"]);
    }

    #[test]
    fn test_fixed_size_returned_even_when_not_fitting() {
        let layout = fit_text(
            &EstimatedMeasurer::default(),
            72.0,
            72.0,
            "A long sentence that cannot fit at this size",
            FontSize::Fixed(40.0),
            &TextLayoutOptions::default(),
        );
        assert_eq!(layout.font, "40px sans-serif");
        assert!(!layout.fits);
    }

    #[test]
    fn test_empty_text_fits() {
        let layout = fit_text(
            &EstimatedMeasurer::default(),
            72.0,
            72.0,
            "",
            FontSize::Auto,
            &TextLayoutOptions::default(),
        );
        assert!(layout.fits);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.font, "60px sans-serif");
    }

    #[test]
    fn test_truncates_to_max_chars() {
        let options = TextLayoutOptions {
            max_chars: 3,
            ..Default::default()
        };
        let layout = fit_text(
            &EstimatedMeasurer::default(),
            200.0,
            200.0,
            "abcdef",
            FontSize::Fixed(12.0),
            &options,
        );
        assert_eq!(texts(&layout), vec!["abc"]);
    }

    #[test]
    fn test_smallest_candidate_returned_when_nothing_fits() {
        let text = "x".repeat(200);
        let layout = fit_text(
            &EstimatedMeasurer::default(),
            20.0,
            20.0,
            &text,
            FontSize::Auto,
            &TextLayoutOptions::default(),
        );
        assert!(!layout.fits);
        assert_eq!(layout.font, "7px sans-serif");
        assert!(!layout.lines.is_empty());
    }
}
