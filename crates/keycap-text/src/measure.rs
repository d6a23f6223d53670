//! Text measurement.

use unicode_segmentation::UnicodeSegmentation;

/// Measured extent of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// Measures text rendered with a font descriptor such as `"14px sans-serif"`.
///
/// Measurement is assumed to be cheap but not free; the line breaker keeps
/// the number of calls low.
pub trait TextMeasurer {
    fn measure(&self, font: &str, text: &str) -> TextMetrics;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &str) -> TextMetrics,
{
    fn measure(&self, font: &str, text: &str) -> TextMetrics {
        self(font, text)
    }
}

/// Measurement estimated from the pixel size in the font descriptor.
///
/// Every grapheme is assumed to be `char_width` em wide. Useful for headless
/// previews where no font rasterizer is available.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMeasurer {
    /// Average glyph advance as a multiple of the font size.
    pub char_width: f64,
    /// Ascent as a multiple of the font size.
    pub ascent: f64,
    /// Descent as a multiple of the font size.
    pub descent: f64,
    /// Size used when the descriptor carries no `px` size.
    pub fallback_size: f64,
}

impl Default for EstimatedMeasurer {
    fn default() -> Self {
        Self {
            char_width: 0.55,
            ascent: 0.8,
            descent: 0.2,
            fallback_size: 16.0,
        }
    }
}

impl EstimatedMeasurer {
    fn font_size(&self, font: &str) -> f64 {
        font.split_whitespace()
            .find_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
            .unwrap_or(self.fallback_size)
    }
}

impl TextMeasurer for EstimatedMeasurer {
    fn measure(&self, font: &str, text: &str) -> TextMetrics {
        let size = self.font_size(font);
        let count = text.graphemes(true).count() as f64;
        TextMetrics {
            width: count * size * self.char_width,
            ascent: size * self.ascent,
            descent: size * self.descent,
        }
    }
}
