//! Field normalisation for raw spreadsheet cells.
//!
//! Every function here is total: bad input degrades to an empty string,
//! `None`, or the cleaned original text, never to an error.

use std::sync::LazyLock;

use regex::Regex;

// `\d` is Unicode-aware: Thai and other decimal digits match too.
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("regex is valid"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("regex is valid"));

static COMPACT_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})-(\d{2})(\d{2})$").expect("regex is valid"));

static COLON_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}-\d{2}:\d{2}$").expect("regex is valid"));

// ── Whitespace ────────────────────────────────────────────────────────────────

/// Collapse every whitespace run (line breaks from multi-line quoted cells
/// included) into a single space and trim both ends.
pub fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`clean`] for cells that may be missing altogether.
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean).unwrap_or_default()
}

// ── Numbers ───────────────────────────────────────────────────────────────────

/// `true` for any Unicode decimal digit (`0`-`9`, `๐`-`๙`, ...).
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a single decimal digit in any script.
///
/// Unicode encodes every decimal digit set as ten consecutive code points
/// from zero to nine, so the value is the distance from the start of the run.
fn decimal_digit_value(c: char) -> Option<u64> {
    if let Some(d) = c.to_digit(10) {
        return Some(u64::from(d));
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut offset = 0u64;
    let mut code = u32::from(c);
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

/// Parse a string made only of decimal digits, in any script.
///
/// Returns `None` for empty input, any other character, or `u64` overflow.
pub fn parse_decimal(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    text.chars().try_fold(0u64, |acc, c| {
        acc.checked_mul(10)?.checked_add(decimal_digit_value(c)?)
    })
}

/// Return the value of the last run of decimal digits in `text`.
///
/// Cells such as `"41+2=43"` or `"0 / 5"` carry an arithmetic annotation
/// whose final number is the total, so `43` and `5` respectively.
/// Returns `None` when no digits are present or the run overflows `u64`.
pub fn extract_trailing_integer(text: &str) -> Option<u64> {
    DIGIT_RUN
        .find_iter(text)
        .last()
        .and_then(|m| parse_decimal(m.as_str()))
}

// ── Time ranges ───────────────────────────────────────────────────────────────

/// Normalise an exam time cell to `HH:MM-HH:MM`.
///
/// Accepted shapes, after mapping an en-dash to `-` and dropping spaces:
/// * `0830-1030` → `08:30-10:30`
/// * `13:00-15:00` → unchanged
///
/// Anything else comes back as the [`clean`]ed original.
pub fn normalize_time_range(text: &str) -> String {
    let cleaned = clean(text);
    let compact: String = cleaned
        .chars()
        .map(|c| if c == '\u{2013}' { '-' } else { c })
        .filter(|c| *c != ' ')
        .collect();

    if let Some(caps) = COMPACT_RANGE.captures(&compact) {
        return format!("{}:{}-{}:{}", &caps[1], &caps[2], &caps[3], &caps[4]);
    }
    if COLON_RANGE.is_match(&compact) {
        return compact;
    }
    cleaned
}

// ── Tests ─────────────────────────────────────────────────────────────────────
