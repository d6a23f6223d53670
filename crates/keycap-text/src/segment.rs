//! Grapheme cluster segmentation.

use unicode_segmentation::UnicodeSegmentation;

/// Text split into user-perceived characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedText<'a> {
    /// Grapheme clusters, at most the requested maximum.
    pub chars: Vec<&'a str>,
    /// The text covered by `chars`. Equal to the input when not truncated.
    pub joined: &'a str,
    /// True if the input had more clusters than the maximum.
    pub truncated: bool,
}

/// Split `text` into at most `max_chars` grapheme clusters.
///
/// Segmentation stops as soon as the cap is reached, so long input is never
/// fully walked when only a prefix can be shown.
pub fn segment_text(text: &str, max_chars: usize) -> SegmentedText<'_> {
    let mut chars = Vec::new();
    let mut consumed = 0;

    if max_chars > 0 {
        for cluster in text.graphemes(true) {
            chars.push(cluster);
            consumed += cluster.len();
            if chars.len() == max_chars {
                break;
            }
        }
    }

    let truncated = consumed < text.len();
    SegmentedText {
        chars,
        joined: if truncated { &text[..consumed] } else { text },
        truncated,
    }
}
