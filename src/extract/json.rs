//! Checked access into loosely shaped JSON.
//!
//! Job boards omit, null out, or reshape nested objects freely. Every accessor
//! here returns `None` when any step of the path is missing or has the wrong
//! type, so a record with a surprising shape degrades to sentinels instead of
//! failing. A present `0` is a value, not an absence.

use serde_json::Value;

/// Follow `path` through nested objects.
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Non-empty, trimmed string at `path`.
pub fn text(value: &Value, path: &[&str]) -> Option<String> {
    at(value, path)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Number at `path`; numeric strings such as `"60000"` are accepted too.
pub fn number(value: &Value, path: &[&str]) -> Option<f64> {
    match at(value, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Identifier at `path`, whether the source sends it as a string or an integer.
pub fn ident(value: &Value, path: &[&str]) -> Option<String> {
    match at(value, path)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First element of an array, or the value itself when it is a lone object.
pub fn first(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_or_null_intermediates_are_none() {
        let doc = json!({ "hiringOrganization": null, "baseSalary": "negotiable" });
        assert_eq!(text(&doc, &["hiringOrganization", "name"]), None);
        assert_eq!(number(&doc, &["baseSalary", "value", "minValue"]), None);
        assert_eq!(text(&doc, &["nope"]), None);
    }

    #[test]
    fn nested_values_resolve() {
        let doc = json!({
            "hiringOrganization": { "name": "  Acme  " },
            "baseSalary": { "value": { "minValue": 60000, "maxValue": "120000" } }
        });
        assert_eq!(text(&doc, &["hiringOrganization", "name"]).as_deref(), Some("Acme"));
        assert_eq!(number(&doc, &["baseSalary", "value", "minValue"]), Some(60000.0));
        assert_eq!(number(&doc, &["baseSalary", "value", "maxValue"]), Some(120000.0));
    }

    #[test]
    fn zero_is_a_value() {
        let doc = json!({ "salaryMin": 0, "id": 0 });
        assert_eq!(number(&doc, &["salaryMin"]), Some(0.0));
        assert_eq!(ident(&doc, &["id"]).as_deref(), Some("0"));
    }

    #[test]
    fn blank_strings_are_none() {
        let doc = json!({ "title": "   ", "id": "" });
        assert_eq!(text(&doc, &["title"]), None);
        assert_eq!(ident(&doc, &["id"]), None);
    }

    #[test]
    fn first_accepts_array_or_object() {
        assert_eq!(first(&json!([{ "name": "EU" }])), Some(&json!({ "name": "EU" })));
        assert_eq!(first(&json!({ "name": "EU" })), Some(&json!({ "name": "EU" })));
        assert_eq!(first(&json!([])), None);
        assert_eq!(first(&json!("EU")), None);
    }
}
