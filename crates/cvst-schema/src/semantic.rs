//! # Semantic Types
//!
//! Domain-specific validators used by resume templates. Each one is an
//! ordinary composition of primitives and refinements; the converter knows
//! nothing about colours or margins and treats them like any other
//! pattern-refined string.
//!
//! Colours are a single alternation pattern rather than a custom predicate
//! so that they convert to JSON Schema. Keyword letters in the cmyk form are
//! spelled as character classes because ECMA-262 patterns have no inline
//! case-insensitive flag.

use std::sync::LazyLock;

use crate::composite::{array, literal, object, union};
use crate::error::SchemaError;
use crate::node::Validator;
use crate::primitive::{enumeration, int, string};

const BYTE: &str = r"(?:[01]?\d\d?|2[0-4]\d|25[0-5])";
const HUE: &str = r"(?:[0-9]|[1-2][0-9]{1,2}|3[0-5][0-9]|360)";
const PERCENT: &str = r"(?:[0-9]{1,2}|100)%";
const ALPHA: &str = r"(?:0|0?\.\d+|1(?:\.0)?)";
const CMYK_CHANNEL: &str = r"(?:\d{1,2}|100)%?";

/// Alternation of the hex, rgb, rgba, hsl, hsla and cmyk colour grammars.
pub static COLOR_PATTERN: LazyLock<String> = LazyLock::new(|| {
    let hex = "#(?:[A-F0-9]{6}|[A-F0-9]{3}|[a-f0-9]{6}|[a-f0-9]{3})";
    let rgb = format!(r"rgb\(\s*{BYTE}\s*,\s*{BYTE}\s*,\s*{BYTE}\s*\)");
    let rgba = format!(r"rgba\(\s*{BYTE}\s*,\s*{BYTE}\s*,\s*{BYTE}\s*,\s*{ALPHA}\s*\)");
    let hsl = format!(r"hsl\(\s*{HUE}\s*,\s*{PERCENT}\s*,\s*{PERCENT}\s*\)");
    let hsla = format!(r"hsla\(\s*{HUE}\s*,\s*{PERCENT}\s*,\s*{PERCENT}\s*,\s*{ALPHA}\s*\)");
    let cmyk = format!(
        r"[cC][mM][yY][kK]\(\s*{c}\s*,\s*{c}\s*,\s*{c}\s*,\s*{c}\s*\)",
        c = CMYK_CHANNEL
    );
    format!("^(?:{hex}|{rgb}|{rgba}|{hsl}|{hsla}|{cmyk})$")
});

/// A length with a print or screen unit, e.g. `1.5cm`.
pub const MARGIN_PATTERN: &str = r"^\d+(\.\d+)?\s*(cm|mm|in|pt|px)$";

/// A font size, e.g. `11pt` or `120%`.
pub const FONT_SIZE_PATTERN: &str = r"^\d+(px|pt|em|rem|%)$";

/// Sentinel used in place of an end date for ongoing entries.
pub const PRESENT: &str = "Present";

/// English month names accepted by [`date`].
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Paper sizes a page may be laid out on.
pub const PAPER_SIZES: [&str; 4] = ["A4", "A5", "letter", "legal"];

/// A CSS-style colour string.
pub fn color() -> Validator {
    string().regex(COLOR_PATTERN.as_str())
}

/// A single margin or spacing length.
pub fn margin() -> Validator {
    string().regex(MARGIN_PATTERN)
}

/// Optional margins on all four sides.
pub fn margins() -> Result<Validator, SchemaError> {
    object([
        ("top", margin().optional()),
        ("bottom", margin().optional()),
        ("left", margin().optional()),
        ("right", margin().optional()),
    ])
}

/// A font size.
pub fn font_size() -> Validator {
    string().regex(FONT_SIZE_PATTERN)
}

/// Font family stack, size and colour.
pub fn font() -> Result<Validator, SchemaError> {
    object([
        ("family", array(string()).min_len(1).optional()),
        ("size", font_size().optional()),
        ("color", color().optional()),
    ])
}

/// A paper size name.
pub fn paper() -> Result<Validator, SchemaError> {
    enumeration(PAPER_SIZES)
}

/// A calendar date split into year, month and day.
pub fn date() -> Result<Validator, SchemaError> {
    object([
        ("year", int().min(1900.0).max(2100.0)),
        (
            "month",
            union([int().min(1.0).max(12.0), enumeration(MONTH_NAMES)?])?,
        ),
        ("day", int().min(1.0).max(31.0)),
    ])
}

/// A [`date`] or the literal [`PRESENT`].
pub fn date_or_present() -> Result<Validator, SchemaError> {
    union([date()?, literal(PRESENT)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn color_pattern_compiles() {
        assert!(crate::pattern::compile(&COLOR_PATTERN).is_ok());
        assert_eq!(color().check(), Ok(()));
    }

    #[test]
    fn color_accepts_every_notation() {
        let c = color();
        for ok in [
            "#FFF",
            "#a1b2c3",
            "rgb(255, 0, 10)",
            "rgba(0,0,0,0.5)",
            "hsl(120, 50%, 50%)",
            "hsla(360, 100%, 0%, 1.0)",
            "cmyk(0%, 10%, 20%, 100%)",
            "CMYK(0,0,0,100)",
        ] {
            assert!(c.parse(&json!(ok)).is_ok(), "{ok} should be a colour");
        }
    }

    #[test]
    fn color_rejects_garbage() {
        let c = color();
        for bad in ["#ggg", "#AbC", "rgb(256,0,0)", "blue", "hsl(361, 0%, 0%)"] {
            assert!(c.parse(&json!(bad)).is_err(), "{bad} should not be a colour");
        }
    }

    #[test]
    fn margin_and_font_size() {
        assert!(margin().parse(&json!("2 cm")).is_ok());
        assert!(margin().parse(&json!("2")).is_err());
        assert!(font_size().parse(&json!("11pt")).is_ok());
        assert!(font_size().parse(&json!("11 pt")).is_err());
        // Arabic-Indic digits are not `\d` in a JSON Schema pattern
        assert!(font_size().parse(&json!("١٢px")).is_err());
        assert!(margin().parse(&json!("٢cm")).is_err());
    }

    #[test]
    fn date_month_accepts_number_or_name() {
        let d = date().unwrap();
        assert!(d.parse(&json!({ "year": 2021, "month": 3, "day": 1 })).is_ok());
        assert!(d
            .parse(&json!({ "year": 2021, "month": "March", "day": 1 }))
            .is_ok());
        assert!(d.parse(&json!({ "year": 2021, "month": 13, "day": 1 })).is_err());
        assert!(d.parse(&json!({ "year": 1800, "month": 1, "day": 1 })).is_err());
    }

    #[test]
    fn end_date_may_be_present() {
        let end = date_or_present().unwrap();
        assert_eq!(end.parse(&json!("Present")).unwrap(), json!("Present"));
        assert!(end.parse(&json!("Future")).is_err());
    }
}
