//! # Resume Templates
//!
//! Built-in validator trees for whole resume documents. Templates are plain
//! compositions of the combinators in this crate and convert like any
//! user-supplied tree.

use serde_json::json;

use crate::composite::{array, object};
use crate::error::SchemaError;
use crate::node::Validator;
use crate::primitive::{boolean, e164, email, enumeration, string, url};
use crate::semantic::{date, date_or_present, font, margin, margins, paper};

/// Name of the standard resume template.
pub const STANDARD_RESUME: &str = "standard-resume";

/// Names accepted by [`template`].
pub const TEMPLATE_NAMES: [&str; 1] = [STANDARD_RESUME];

/// Look up a built-in template by name.
///
/// Returns `None` for unknown names.
pub fn template(name: &str) -> Option<Result<Validator, SchemaError>> {
    match name {
        STANDARD_RESUME => Some(standard_resume()),
        _ => None,
    }
}

/// Contact details. Only the name is mandatory.
pub fn contact() -> Result<Validator, SchemaError> {
    object([
        ("name", string().nonempty()),
        ("phone", e164().optional()),
        ("location", string().optional()),
        ("email", email().optional()),
        ("website", url().optional()),
        ("linkedin-user-id", string().optional()),
        ("github-username", string().optional()),
    ])
}

/// A short professional summary.
pub fn summary() -> Result<Validator, SchemaError> {
    object([("sentences", array(string().nonempty()).min_len(1))])
}

/// Work history.
pub fn experience() -> Result<Validator, SchemaError> {
    Ok(array(object([
        ("title", string().min_len(1)),
        ("company", string().min_len(1)),
        ("location", string().optional()),
        ("start-date", date()?),
        ("end-date", date_or_present()?),
        ("activities", array(string()).with_default(json!([]))),
    ])?))
}

/// Personal or professional projects.
pub fn projects() -> Result<Validator, SchemaError> {
    Ok(array(object([
        ("name", string().nonempty()),
        ("stack", array(string().nonempty()).optional()),
        ("url", url().optional()),
        ("activities", array(string().nonempty()).optional()),
    ])?))
}

/// Degrees and schooling.
pub fn education() -> Result<Validator, SchemaError> {
    Ok(array(object([
        ("institution", string().nonempty()),
        ("degree", string().nonempty()),
        ("grade", string().nonempty().optional()),
        ("start-date", date()?),
        ("end-date", date_or_present()?),
        ("location", string().optional()),
        ("activities", array(string().nonempty()).optional()),
        ("description", string().optional()),
    ])?))
}

/// Skills grouped by category.
pub fn skills() -> Result<Validator, SchemaError> {
    Ok(array(object([
        ("category", string().nonempty()),
        ("items", array(string().nonempty()).min_len(1)),
    ])?))
}

/// Certifications and their validity.
pub fn certifications() -> Result<Validator, SchemaError> {
    Ok(array(object([
        ("title", string().nonempty()),
        ("issuer", string().nonempty().optional()),
        ("issuance-date", date()?),
        ("expiration-date", date_or_present()?.optional()),
        ("credential-id", string().nonempty().optional()),
        ("credential-url", url().optional()),
        ("description", string().optional()),
    ])?))
}

/// Paper, font and margins of the page.
pub fn page_settings() -> Result<Validator, SchemaError> {
    object([
        ("paper", paper()?.optional()),
        ("font", font()?.optional()),
        ("margins", margins()?.optional()),
    ])
}

/// Spacing and heading style shared by all sections.
pub fn section_settings() -> Result<Validator, SchemaError> {
    let spacings = object([
        ("above", margin().optional()),
        ("below", margin().optional()),
    ])?;
    let headings = object([
        ("font", font()?.optional()),
        ("color", string().optional()),
        (
            "case",
            enumeration(["uppercase", "lowercase", "capitalize", "normal"])?.optional(),
        ),
        ("bold", boolean().optional()),
    ])?;
    object([
        ("spacings", spacings.optional()),
        ("headings", headings.optional()),
    ])
}

/// The standard resume: layout settings plus content sections.
pub fn standard_resume() -> Result<Validator, SchemaError> {
    let settings = object([
        ("page", page_settings()?.optional()),
        ("sections", section_settings()?.optional()),
    ])?;
    let sections = object([
        ("contact", contact()?),
        ("summary", summary()?.optional()),
        ("experience", experience()?.min_len(1).optional()),
        ("projects", projects()?.min_len(1).optional()),
        ("education", education()?.min_len(1).optional()),
        ("skills", skills()?.min_len(1).optional()),
        ("certifications", certifications()?.min_len(1).optional()),
    ])?;
    object([
        ("settings", settings.optional()),
        ("sections", sections),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn template_lookup() {
        assert!(template(STANDARD_RESUME).is_some());
        assert!(template("modern-resume").is_none());
        for name in TEMPLATE_NAMES {
            let tree = template(name).unwrap().unwrap();
            assert_eq!(tree.check(), Ok(()));
        }
    }

    #[test]
    fn minimal_resume_parses() {
        let resume = standard_resume().unwrap();
        let parsed = resume
            .parse(&json!({ "sections": { "contact": { "name": "Ada Lovelace" } } }))
            .unwrap();
        assert_eq!(parsed["sections"]["contact"]["name"], "Ada Lovelace");
    }

    #[test]
    fn experience_activities_default_to_empty() {
        let resume = standard_resume().unwrap();
        let err = resume
            .parse(&json!({
                "sections": {
                    "contact": { "name": "Ada Lovelace" },
                    "experience": [{
                        "title": "Analyst",
                        "company": "Analytical Engines Ltd",
                        "start-date": { "year": 1842, "month": 1, "day": 1 },
                        "end-date": "Present"
                    }]
                }
            }))
            .unwrap_err();
        // 1842 is below the year floor
        assert_eq!(
            err.issues()[0].path,
            "/sections/experience/0/start-date/year"
        );

        let parsed = resume
            .parse(&json!({
                "sections": {
                    "contact": { "name": "Ada Lovelace" },
                    "experience": [{
                        "title": "Analyst",
                        "company": "Analytical Engines Ltd",
                        "start-date": { "year": 1942, "month": "January", "day": 1 },
                        "end-date": "Present"
                    }]
                }
            }))
            .unwrap();
        assert_eq!(parsed["sections"]["experience"][0]["activities"], json!([]));
    }

    #[test]
    fn empty_experience_list_is_rejected() {
        let resume = standard_resume().unwrap();
        assert!(resume
            .parse(&json!({
                "sections": { "contact": { "name": "Ada" }, "experience": [] }
            }))
            .is_err());
    }
}
