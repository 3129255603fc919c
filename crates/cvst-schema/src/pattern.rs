//! # Pattern Dialect
//!
//! Pattern refinements are written in the ECMA-262 dialect, because that is
//! what JSON Schema consumers execute. Matching here goes through `regex`,
//! so every pattern is first translated to a Rust expression with the same
//! meaning:
//!
//! - `\d`, `\w` and `\b` are ASCII-only, as in ECMA-262 without the `u`
//!   flag;
//! - `\s` and `.` use the ECMA-262 whitespace and line-terminator sets;
//! - `[` inside a class is a literal, not a nested class.
//!
//! Rust-only syntax (inline flags, `(?P<name>`, `\A`, `\z`, `\p{..}`, class
//! set operators) is rejected instead of translated. The emitted schema
//! always carries the pattern exactly as written.
//!
//! Compiled expressions are cached by pattern text.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use regex::Regex;

const DIGIT: &str = "[0-9]";
const NOT_DIGIT: &str = "[^0-9]";
const WORD: &str = "[0-9A-Za-z_]";
const NOT_WORD: &str = "[^0-9A-Za-z_]";
const SPACE_SET: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";
const DOT: &str = r"[^\n\r\x{2028}\x{2029}]";

static COMPILED: LazyLock<RwLock<HashMap<String, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Compile an ECMA-262 pattern, reusing an earlier compilation when there
/// is one.
///
/// # Errors
///
/// Returns a human-readable reason when the pattern uses syntax outside the
/// portable subset or does not compile.
pub(crate) fn compile(pattern: &str) -> Result<Regex, String> {
    if let Some(re) = COMPILED
        .read()
        .ok()
        .and_then(|cache| cache.get(pattern).cloned())
    {
        return Ok(re);
    }
    let re = Regex::new(&translate(pattern)?).map_err(|e| e.to_string())?;
    // a poisoned cache only costs a recompile
    if let Ok(mut cache) = COMPILED.write() {
        cache.insert(pattern.to_string(), re.clone());
    }
    Ok(re)
}

fn translate(pattern: &str) -> Result<String, String> {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| "pattern ends with a lone backslash".to_string())?;
                match escaped {
                    'd' => out.push_str(DIGIT),
                    'D' => out.push_str(NOT_DIGIT),
                    'w' => out.push_str(WORD),
                    'W' => out.push_str(NOT_WORD),
                    's' => {
                        out.push('[');
                        out.push_str(SPACE_SET);
                        out.push(']');
                    }
                    'S' => {
                        out.push_str("[^");
                        out.push_str(SPACE_SET);
                        out.push(']');
                    }
                    // backspace inside a class
                    'b' if in_class => out.push_str(r"\x08"),
                    'b' => out.push_str(r"(?-u:\b)"),
                    'B' => out.push_str(r"(?-u:\B)"),
                    'A' | 'z' | 'Z' | 'p' | 'P' => {
                        return Err(format!("`\\{escaped}` is not an ECMA-262 escape"))
                    }
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            '[' if in_class => out.push_str(r"\["),
            '[' => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('^');
                }
                if chars.peek() == Some(&']') {
                    return Err("empty character class".into());
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '&' | '~' if in_class => {
                out.push('\\');
                out.push(c);
            }
            '-' if in_class && chars.peek() == Some(&'-') => {
                return Err("`--` inside a character class".into());
            }
            '.' if !in_class => out.push_str(DOT),
            '(' if !in_class && chars.peek() == Some(&'?') => {
                chars.next();
                if !matches!(chars.peek(), Some(':' | '=' | '!' | '<')) {
                    return Err("inline flags and `(?P` groups are not ECMA-262 syntax".into());
                }
                out.push_str("(?");
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
