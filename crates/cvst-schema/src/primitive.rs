//! # Primitive Validators
//!
//! Constructors for the leaf nodes of a validator tree: strings (plain or
//! format-tagged), numbers, integers, booleans and string enums.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SchemaError;
use crate::node::{Kind, StringFormat, Validator};

/// Pattern for E.164 phone numbers, shared by parsing and conversion.
pub const E164_PATTERN: &str = r"^\+[1-9]\d{6,14}$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});


impl StringFormat {
    /// Whether `value` is well-formed for this format.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            StringFormat::Email => EMAIL_RE.is_match(value),
            StringFormat::Url => url::Url::parse(value).is_ok(),
            StringFormat::E164 => {
                crate::pattern::compile(E164_PATTERN).is_ok_and(|re| re.is_match(value))
            }
        }
    }
}

fn string_kind(format: Option<StringFormat>) -> Validator {
    Validator::new(Kind::String {
        min_length: None,
        max_length: None,
        format,
    })
}

/// Any string.
pub fn string() -> Validator {
    string_kind(None)
}

/// An e-mail address.
pub fn email() -> Validator {
    string_kind(Some(StringFormat::Email))
}

/// An absolute URL.
pub fn url() -> Validator {
    string_kind(Some(StringFormat::Url))
}

/// An E.164 phone number such as `+14155550123`.
pub fn e164() -> Validator {
    string_kind(Some(StringFormat::E164))
}

/// Any number.
pub fn number() -> Validator {
    Validator::new(Kind::Number {
        integer: false,
        minimum: None,
        maximum: None,
    })
}

/// An integral number.
pub fn int() -> Validator {
    Validator::new(Kind::Number {
        integer: true,
        minimum: None,
        maximum: None,
    })
}

/// `true` or `false`.
pub fn boolean() -> Validator {
    Validator::new(Kind::Boolean)
}

/// One of a fixed, non-empty set of strings.
///
/// # Errors
///
/// Returns [`SchemaError::EmptyEnum`] or [`SchemaError::DuplicateEnumValue`].
pub fn enumeration<I, S>(values: I) -> Result<Validator, SchemaError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let node = Validator::new(Kind::Enum {
        values: values.into_iter().map(Into::into).collect(),
    });
    node.check()?;
    Ok(node)
}
