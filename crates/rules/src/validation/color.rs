//! Row color format check.

use std::sync::LazyLock;

use regex::Regex;

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#[a-f0-9]{6}$").expect("color pattern compiles"));

/// `#` followed by exactly six hex digits, any case. Absent or empty is invalid.
pub fn is_valid_color(color: Option<&str>) -> bool {
    color.is_some_and(|c| COLOR_RE.is_match(c))
}
