//! Validation at the LLM-response boundary.
//!
//! LLM replies are untrusted JSON. Nothing reaches the store or the templates
//! without passing through one of these functions.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::cv::lenient;
use crate::cv::model::{
    CustomSection, CvData, EducationEntry, ExperienceEntry, ExtractedCv, Header, Skills,
    VolunteeringEntry,
};

/// Placeholder for required header fields the model left empty.
pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field '{field}' has the wrong shape: {source}")]
    Field {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Removes `null` object values and `null` array items, recursively, so
/// that field defaults apply instead of deserialization failing.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

/// Rewrites the legacy shapes models still produce: `personalInfo` for
/// `header`, and a flat `skills` array for `{technical, soft}`.
fn normalize_aliases(map: &mut Map<String, Value>) {
    if !map.contains_key("header") {
        if let Some(info) = map.remove("personalInfo") {
            map.insert("header".to_string(), info);
        }
    }
    let flat_skills = match map.get("skills") {
        Some(Value::Array(flat)) => Some(flat.clone()),
        _ => None,
    };
    if let Some(technical) = flat_skills {
        map.insert(
            "skills".to_string(),
            serde_json::json!({ "technical": technical, "soft": [] }),
        );
    }
}

fn shape_error(field: String, expected: &str, value: &Value) -> ValidationError {
    ValidationError::Field {
        field,
        source: serde_json::Error::custom(format!("expected {expected}, got {}", kind_of(value))),
    }
}

/// Checks an object one key at a time so the error names `path.key`.
fn check_object<T: DeserializeOwned>(path: &str, value: &Value) -> Result<(), ValidationError> {
    let Value::Object(map) = value else {
        return Err(shape_error(path.to_string(), "an object", value));
    };
    for (key, item) in map {
        let single = Value::Object(Map::from_iter([(key.clone(), item.clone())]));
        serde_json::from_value::<T>(single)
            .map_err(|source| ValidationError::Field {
                field: format!("{path}.{key}"),
                source,
            })?;
    }
    Ok(())
}

fn check_entries<T: DeserializeOwned>(field: &str, value: &Value) -> Result<(), ValidationError> {
    let Value::Array(items) = value else {
        return Err(shape_error(field.to_string(), "an array", value));
    };
    for (index, item) in items.iter().enumerate() {
        check_object::<T>(&format!("{field}[{index}]"), item)?;
    }
    Ok(())
}

/// Checks each known field on its own so the error names it, down to the
/// entry and key (`education[0].endDate`).
fn check_fields(map: &Map<String, Value>) -> Result<(), ValidationError> {
    for (field, value) in map {
        match field.as_str() {
            "header" => check_object::<Header>(field, value)?,
            "skills" => check_object::<Skills>(field, value)?,
            "experience" => check_entries::<ExperienceEntry>(field, value)?,
            "education" => check_entries::<EducationEntry>(field, value)?,
            "volunteering" => check_entries::<VolunteeringEntry>(field, value)?,
            "customSections" => check_entries::<CustomSection>(field, value)?,
            "profileSummary" => lenient::string(value.clone())
                .map(drop)
                .map_err(|source| ValidationError::Field {
                    field: field.clone(),
                    source,
                })?,
            "programmingLanguages" | "softwareTools" => lenient::string_list(value.clone())
                .map(drop)
                .map_err(|source| ValidationError::Field {
                    field: field.clone(),
                    source,
                })?,
            _ => {}
        }
    }
    Ok(())
}

fn prepare(value: Value) -> Result<Map<String, Value>, ValidationError> {
    let mut value = value;
    strip_nulls(&mut value);
    let kind = kind_of(&value);
    let Value::Object(mut map) = value else {
        return Err(ValidationError::NotAnObject(kind));
    };
    normalize_aliases(&mut map);
    check_fields(&map)?;
    Ok(map)
}

/// Parses an untrusted object into the partial document `loadExtractedData`
/// merges. Unknown top-level keys are dropped.
pub fn parse_extracted(value: Value) -> Result<ExtractedCv, ValidationError> {
    let map = prepare(value)?;
    serde_json::from_value(Value::Object(map)).map_err(|source| ValidationError::Field {
        field: "<root>".to_string(),
        source,
    })
}

/// Parses an untrusted object into a complete document for the portfolio
/// pipeline, filling required header fields with `"Not provided"`.
pub fn normalize_for_portfolio(value: Value) -> Result<CvData, ValidationError> {
    let map = prepare(value)?;
    let mut cv: CvData =
        serde_json::from_value(Value::Object(map)).map_err(|source| ValidationError::Field {
            field: "<root>".to_string(),
            source,
        })?;

    for field in [
        &mut cv.header.full_name,
        &mut cv.header.title,
        &mut cv.header.email,
    ] {
        if field.trim().is_empty() {
            *field = NOT_PROVIDED.to_string();
        }
    }
    Ok(cv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_extracted_keeps_only_present_fields() {
        let extracted = parse_extracted(json!({"header": {"fullName": "X"}})).unwrap();
        assert_eq!(extracted.header.unwrap().full_name, "X");
        assert!(extracted.experience.is_none());
        assert!(extracted.skills.is_none());
    }

    #[test]
    fn test_parse_extracted_rejects_non_object() {
        let err = parse_extracted(json!(["a"])).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject("an array")));
    }

    #[test]
    fn test_parse_extracted_names_bad_field() {
        let err = parse_extracted(json!({"experience": "lots"})).unwrap_err();
        match err {
            ValidationError::Field { field, .. } => assert_eq!(field, "experience"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nulls_fall_back_to_defaults() {
        let extracted = parse_extracted(json!({
            "header": {"fullName": "Y", "email": null},
            "experience": [{"company": "Acme", "endDate": null}],
            "profileSummary": null
        }))
        .unwrap();
        assert_eq!(extracted.header.unwrap().email, "");
        assert_eq!(extracted.experience.unwrap()[0].end_date, "");
        assert!(extracted.profile_summary.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let extracted = parse_extracted(json!({"favouriteColour": "green"})).unwrap();
        assert_eq!(extracted, ExtractedCv::default());
    }

    #[test]
    fn test_personal_info_alias_and_flat_skills() {
        let extracted = parse_extracted(json!({
            "personalInfo": {"fullName": "Z"},
            "skills": ["Rust", "SQL"]
        }))
        .unwrap();
        assert_eq!(extracted.header.unwrap().full_name, "Z");
        let skills = extracted.skills.unwrap();
        assert_eq!(skills.technical, vec!["Rust", "SQL"]);
        assert!(skills.soft.is_empty());
    }

    #[test]
    fn test_normalize_for_portfolio_fills_not_provided() {
        let cv = normalize_for_portfolio(json!({"header": {"fullName": "Ada"}})).unwrap();
        assert_eq!(cv.header.full_name, "Ada");
        assert_eq!(cv.header.title, NOT_PROVIDED);
        assert_eq!(cv.header.email, NOT_PROVIDED);
        // Optional fields stay empty.
        assert_eq!(cv.header.phone, "");
    }

    #[test]
    fn test_normalize_for_portfolio_empty_object() {
        let cv = normalize_for_portfolio(json!({})).unwrap();
        assert_eq!(cv.header.full_name, NOT_PROVIDED);
        assert!(cv.experience.is_empty());
    }

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::Field { field, .. } => field,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_years_and_grades_are_accepted() {
        let cv = normalize_for_portfolio(json!({
            "education": [{"startDate": 2015, "endDate": 2019, "grade": 3.8}]
        }))
        .unwrap();
        let entry = &cv.education[0];
        assert_eq!(entry.start_date, "2015");
        assert_eq!(entry.end_date, "2019");
        assert_eq!(entry.grade, "3.8");
    }

    #[test]
    fn test_string_booleans_are_accepted() {
        let extracted = parse_extracted(json!({
            "experience": [{"current": "true"}, {"current": "false"}]
        }))
        .unwrap();
        let experience = extracted.experience.unwrap();
        assert!(experience[0].current);
        assert!(!experience[1].current);
    }

    #[test]
    fn test_null_list_items_are_dropped() {
        let extracted = parse_extracted(json!({
            "programmingLanguages": ["Rust", null],
            "experience": [null, {"company": "Acme", "achievements": [null, "Led"]}],
            "skills": {"technical": [null], "soft": ["Patience", null]}
        }))
        .unwrap();
        assert_eq!(extracted.programming_languages.unwrap(), vec!["Rust"]);
        let experience = extracted.experience.unwrap();
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].achievements, vec!["Led"]);
        let skills = extracted.skills.unwrap();
        assert!(skills.technical.is_empty());
        assert_eq!(skills.soft, vec!["Patience"]);
    }

    #[test]
    fn test_errors_name_the_entry_and_key() {
        let err = normalize_for_portfolio(json!({
            "education": [{"degree": "BSc"}, {"endDate": {"year": 2019}}]
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "education[1].endDate");

        let err = parse_extracted(json!({"experience": ["Acme"]})).unwrap_err();
        assert_eq!(field_of(err), "experience[0]");

        let err = parse_extracted(json!({"header": {"email": ["a", "b"]}})).unwrap_err();
        assert_eq!(field_of(err), "header.email");

        let err = parse_extracted(json!({"softwareTools": "Git"})).unwrap_err();
        assert_eq!(field_of(err), "softwareTools");
    }
}
