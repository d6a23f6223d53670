//! Candidate font sizes for text elements.

use keycap_core::FontSize;
use smallvec::SmallVec;

/// Smallest fixed font size, in pixels.
pub const MIN_FONT_SIZE: f64 = 3.0;
/// Largest fixed font size, in pixels.
pub const MAX_FONT_SIZE: f64 = 120.0;

/// Sizes to try, largest first.
pub type FontSizeCandidates = SmallVec<[f64; 13]>;

// Tuned by eye on real key faces. The list is picked by text density.
const SIZES_SPARSE: [f64; 13] = [
    60.0, 51.0, 44.0, 31.0, 24.0, 20.0, 17.0, 15.0, 12.0, 10.0, 9.0, 8.0, 7.0,
];
const SIZES_LIGHT: [f64; 10] = [31.0, 24.0, 20.0, 17.0, 15.0, 12.0, 10.0, 9.0, 8.0, 7.0];
const SIZES_MEDIUM: [f64; 9] = [24.0, 20.0, 17.0, 15.0, 12.0, 10.0, 9.0, 8.0, 7.0];
const SIZES_DENSE: [f64; 7] = [17.0, 15.0, 12.0, 10.0, 9.0, 8.0, 7.0];
const SIZES_PACKED: [f64; 6] = [15.0, 12.0, 10.0, 9.0, 8.0, 7.0];

/// Pixel sizes to try for text with `char_count` clusters in a `width` x `height` box.
///
/// A fixed size is clamped to `[MIN_FONT_SIZE, MAX_FONT_SIZE]` and returned alone.
/// `Auto` returns a descending list chosen by comparing the character count
/// against the box area. The result is never empty.
pub fn candidate_font_sizes(
    font_size: FontSize,
    width: f64,
    height: f64,
    char_count: usize,
) -> FontSizeCandidates {
    match font_size {
        FontSize::Fixed(size) if size.is_nan() => SmallVec::from_slice(&[MIN_FONT_SIZE]),
        FontSize::Fixed(size) => {
            SmallVec::from_slice(&[size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)])
        }
        FontSize::Auto => {
            let area = (width * height) / 5000.0;
            let count = char_count as f64;
            let sizes: &[f64] = if count < 7.0 * area {
                &SIZES_SPARSE
            } else if count < 30.0 * area {
                &SIZES_LIGHT
            } else if count < 40.0 * area {
                &SIZES_MEDIUM
            } else if count < 50.0 * area {
                &SIZES_DENSE
            } else {
                &SIZES_PACKED
            };
            SmallVec::from_slice(sizes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_size_is_clamped() {
        assert_eq!(
            candidate_font_sizes(FontSize::Fixed(14.0), 72.0, 72.0, 5).as_slice(),
            &[14.0]
        );
        assert_eq!(
            candidate_font_sizes(FontSize::Fixed(1.0), 72.0, 72.0, 5).as_slice(),
            &[3.0]
        );
        assert_eq!(
            candidate_font_sizes(FontSize::Fixed(500.0), 72.0, 72.0, 5).as_slice(),
            &[120.0]
        );
    }

    #[test]
    fn test_auto_short_text_uses_largest_bucket() {
        let sizes = candidate_font_sizes(FontSize::Auto, 72.0, 72.0, 5);
        assert_eq!(sizes.as_slice(), &SIZES_SPARSE);
        assert_eq!(sizes[0], 60.0);
    }

    #[test]
    fn test_auto_buckets_by_density() {
        // area = 72 * 72 / 5000 = 1.0368
        let bucket = |count| candidate_font_sizes(FontSize::Auto, 72.0, 72.0, count)[0];
        assert_eq!(bucket(7), 60.0);
        assert_eq!(bucket(8), 31.0);
        assert_eq!(bucket(31), 31.0);
        assert_eq!(bucket(32), 24.0);
        assert_eq!(bucket(42), 17.0);
        assert_eq!(bucket(52), 15.0);
        assert_eq!(bucket(1000), 15.0);
    }

    #[test]
    fn test_auto_lists_are_descending() {
        for list in [
            &SIZES_SPARSE[..],
            &SIZES_LIGHT[..],
            &SIZES_MEDIUM[..],
            &SIZES_DENSE[..],
            &SIZES_PACKED[..],
        ] {
            assert!(list.windows(2).all(|w| w[0] > w[1]));
            assert_eq!(list.last(), Some(&7.0));
        }
    }
}
