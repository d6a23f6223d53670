//! Line breaking of segmented text into a fixed-size box.
//!
//! Each line takes the longest run of clusters that fits the box width. The
//! run is found by interpolating a guess from measured widths and then
//! scanning one cluster at a time, which keeps measurement calls low for
//! long lines. Within the run a break is preferred after a space, `-`, `_`,
//! `:` or `~`, and an explicit newline always ends the line.

use crate::measure::TextMeasurer;
use serde::Serialize;
use tracing::trace;

/// Vertical rhythm comes from this glyph, not the text, so tall emoji do not
/// stretch the line height.
const PROBE_GLYPH: &str = "A";

const BREAK_CHARS: [&str; 5] = [" ", "-", "_", ":", "~"];

/// Upper bound on interpolation rounds before the exact scan takes over.
const MAX_ESTIMATE_ROUNDS: usize = 16;

/// One laid out line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub ascent: f64,
    pub descent: f64,
}

/// Result of laying out text at one font size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayout {
    /// Font descriptor the text was measured with.
    pub font: String,
    pub lines: Vec<TextLine>,
    /// Height of one line, measured from the probe glyph.
    pub line_height: f64,
    /// Ascent of the probe glyph.
    pub ascent: f64,
    /// True iff every cluster was placed and the lines fit the box height.
    pub fits: bool,
}

impl TextLayout {
    /// Total height of the laid out lines.
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }
}

/// Wrap `chars` into lines that fit a `width` x `height` pixel box.
///
/// `fits` is decided before the final trim: when the lines overflow the box,
/// the last line is dropped and `fits` stays false.
pub fn compute_text_layout<M: TextMeasurer + ?Sized>(
    measurer: &M,
    width: f64,
    height: f64,
    chars: &[&str],
    font: &str,
) -> TextLayout {
    let probe = measurer.measure(font, PROBE_GLYPH);
    let line_height = probe.ascent + probe.descent;

    let make_line = |text: String| {
        if text.is_empty() {
            TextLine {
                text,
                ascent: probe.ascent,
                descent: probe.descent,
            }
        } else {
            let metrics = measurer.measure(font, &text);
            TextLine {
                text,
                ascent: metrics.ascent,
                descent: metrics.descent,
            }
        }
    };

    let mut lines: Vec<TextLine> = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if (lines.len() + 1) as f64 * line_height > height {
            break;
        }

        // A single space left over from a wrap is dropped; longer runs are kept.
        if !lines.is_empty() && chars[pos] == " " && chars.get(pos + 1) != Some(&" ") {
            pos += 1;
            continue;
        }

        let remaining = &chars[pos..];
        let fit = max_fitting_chars(measurer, font, remaining, width);

        if fit == remaining.len() {
            let rest = remaining.concat();
            for part in rest.split('\n') {
                let part = part.strip_suffix('\r').unwrap_or(part);
                lines.push(make_line(part.to_string()));
            }
            pos = chars.len();
            break;
        }

        let run = &remaining[..fit];
        let (line_len, mut consumed, explicit) = match run.iter().position(|c| is_newline(c)) {
            Some(newline) => (newline, newline + 1, true),
            None => match run.iter().rposition(|c| BREAK_CHARS.contains(c)) {
                Some(i) if run[i] == " " => (i, i + 1, false),
                Some(i) => (i + 1, i + 1, false),
                None => (fit, fit, false),
            },
        };

        if line_len == 0 && !explicit {
            pos += 1;
            continue;
        }

        // A newline right after a wrapped line belongs to that line.
        if !explicit && remaining.get(consumed).is_some_and(|c| is_newline(c)) {
            consumed += 1;
        }

        lines.push(make_line(run[..line_len].concat()));
        pos += consumed;
    }

    let fits = pos >= chars.len() && lines.len() as f64 * line_height <= height;

    if lines.len() as f64 * line_height > height {
        lines.pop();
    }

    TextLayout {
        font: font.to_string(),
        lines,
        line_height,
        ascent: probe.ascent,
        fits,
    }
}

fn is_newline(cluster: &str) -> bool {
    cluster == "\n" || cluster == "\r\n"
}

/// Number of leading clusters of `chars` whose measured width fits `width`.
///
/// Never less than one, even when a single cluster overflows.
fn max_fitting_chars<M: TextMeasurer + ?Sized>(
    measurer: &M,
    font: &str,
    chars: &[&str],
    width: f64,
) -> usize {
    let total = chars.len();
    let measure = |count: usize| measurer.measure(font, &chars[..count].concat()).width;

    let full_width = measure(total);
    if full_width <= width {
        return total;
    }

    let average = full_width / total as f64;
    let mut guess = clamp_count(width / average, total);
    let mut guess_width = measure(guess);

    if (guess_width - width).abs() > average {
        for round in 0..MAX_ESTIMATE_ROUNDS {
            let per_char = guess_width / guess as f64;
            if per_char <= 0.0 {
                break;
            }
            let next = clamp_count(guess as f64 + (width - guess_width) / per_char, total);
            let settled = next.abs_diff(guess) <= 1;
            trace!(round, guess, next, "refining line fit estimate");
            guess = next;
            guess_width = measure(guess);
            if settled {
                break;
            }
        }
    }

    if guess_width <= width {
        while guess < total && measure(guess + 1) <= width {
            guess += 1;
        }
    } else {
        while guess > 1 {
            guess -= 1;
            if measure(guess) <= width {
                break;
            }
        }
    }

    guess
}

fn clamp_count(estimate: f64, total: usize) -> usize {
    if !estimate.is_finite() || estimate < 1.0 {
        1
    } else {
        (estimate.floor() as usize).clamp(1, total)
    }
}
