//! # Form Validation
//!
//! A declarative rule set applied to a flat `field → value` map. Each field's rules
//! run in a fixed order:
//!
//! 1. `required`: value is empty after trimming
//! 2. `min_length` / `max_length`: counted in characters
//! 3. `email` / `url`: only checked when the value is non-empty
//! 4. `custom`: any `Fn(&str) -> Option<String>`
//!
//! Every failing rule adds its message, so a field's first message always belongs to
//! its first failing rule; that is the one a form shows. Validation is headless: it
//! returns a [`ValidationReport`] and never decides how errors are displayed.
//!
//! ```
//! use blogcms::validation::{validate, FieldRules, FormData, RuleSet};
//!
//! let rules = RuleSet::new().field("title", FieldRules::new("Title").required().min_length(1));
//! let mut data = FormData::new();
//! data.insert("title".into(), "".into());
//!
//! let report = validate(&data, &rules);
//! assert!(!report.is_valid);
//! assert_eq!(report.first_error("title"), Some("Title is required"));
//! ```

pub mod forms;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidateEmail, ValidateUrl};

pub use forms::{category_rules, post_rules, CategoryForm, PostForm};

/// Field values as submitted by a form.
pub type FormData = BTreeMap<String, String>;

pub type CustomRule = Box<dyn Fn(&str) -> Option<String>>;

pub struct FieldRules {
    label: String,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    email: bool,
    url: bool,
    custom: Option<CustomRule>,
}

impl FieldRules {
    /// `label` is the human name used in messages ("Title is required").
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: false,
            min_length: None,
            max_length: None,
            email: false,
            url: false,
            custom: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    pub fn custom(mut self, rule: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.custom = Some(Box::new(rule));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Messages for `value` (already trimmed), in rule order.
    pub fn check(&self, value: &str) -> Vec<String> {
        let mut errors = Vec::new();
        let len = value.chars().count();

        if self.required && value.is_empty() {
            errors.push(format!("{} is required", self.label));
        }
        if let Some(min) = self.min_length.filter(|min| len < *min) {
            errors.push(format!("{} must be at least {} characters", self.label, min));
        }
        if let Some(max) = self.max_length.filter(|max| len > *max) {
            errors.push(format!(
                "{} must be no more than {} characters",
                self.label, max
            ));
        }
        if self.email && !value.is_empty() && !value.to_string().validate_email() {
            errors.push(format!("{} must be a valid email address", self.label));
        }
        if self.url && !value.is_empty() && !value.to_string().validate_url() {
            errors.push(format!("{} must be a valid URL", self.label));
        }
        if let Some(message) = self.custom.as_ref().and_then(|rule| rule(value)) {
            errors.push(message);
        }
        errors
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("email", &self.email)
            .field("url", &self.url)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Rules per field, evaluated in insertion order.
#[derive(Debug, Default)]
pub struct RuleSet {
    fields: Vec<(String, FieldRules)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.fields.push((name.into(), rules));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRules)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Only fields with at least one violation appear here.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    /// The first message of every failing field, ordered by field name.
    pub fn summary(&self) -> Vec<String> {
        self.errors
            .values()
            .filter_map(|messages| messages.first().cloned())
            .collect()
    }
}

/// Applies `rules` to `data`. A field missing from `data` validates as empty.
pub fn validate(data: &FormData, rules: &RuleSet) -> ValidationReport {
    let mut errors = BTreeMap::new();
    for (name, field_rules) in rules.fields() {
        let value = data.get(name).map(|v| v.trim()).unwrap_or("");
        let messages = field_rules.check(value);
        if !messages.is_empty() {
            errors.insert(name.to_string(), messages);
        }
    }
    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_required_field_fails_with_required_message() {
        let rules = RuleSet::new().field("title", FieldRules::new("Title").required().min_length(1));
        let report = validate(&data(&[("title", "")]), &rules);

        assert!(!report.is_valid);
        assert!(report.messages("title")[0].contains("required"));
        assert_eq!(
            report.messages("title"),
            &[
                "Title is required".to_string(),
                "Title must be at least 1 characters".to_string()
            ]
        );
    }

    #[test]
    fn test_valid_data_has_no_errors() {
        let rules = RuleSet::new().field("title", FieldRules::new("Title").required().max_length(5));
        let report = validate(&data(&[("title", "  ok  ")]), &rules);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_field_counts_as_empty() {
        let rules = RuleSet::new().field("name", FieldRules::new("Name").required());
        let report = validate(&FormData::new(), &rules);
        assert_eq!(report.first_error("name"), Some("Name is required"));
    }

    #[test]
    fn test_max_length_counts_characters() {
        let rules = RuleSet::new().field("name", FieldRules::new("Name").max_length(3));
        assert!(validate(&data(&[("name", "äöü")]), &rules).is_valid);
        let report = validate(&data(&[("name", "abcd")]), &rules);
        assert_eq!(
            report.first_error("name"),
            Some("Name must be no more than 3 characters")
        );
    }

    #[test]
    fn test_email_and_url_skip_empty_values() {
        let rules = RuleSet::new()
            .field("email", FieldRules::new("Email").email())
            .field("site", FieldRules::new("Website").url());
        assert!(validate(&data(&[("email", ""), ("site", "")]), &rules).is_valid);

        let report = validate(&data(&[("email", "nope"), ("site", "not a url")]), &rules);
        assert_eq!(
            report.first_error("email"),
            Some("Email must be a valid email address")
        );
        assert_eq!(report.first_error("site"), Some("Website must be a valid URL"));

        let ok = validate(
            &data(&[("email", "writer@example.com"), ("site", "https://example.com/blog")]),
            &rules,
        );
        assert!(ok.is_valid);
    }

    #[test]
    fn test_custom_rule_runs_last() {
        let rules = RuleSet::new().field(
            "slug",
            FieldRules::new("Slug")
                .required()
                .custom(|v| v.contains(' ').then(|| "Slug cannot contain spaces".to_string())),
        );
        let report = validate(&data(&[("slug", "has space")]), &rules);
        assert_eq!(report.messages("slug"), &["Slug cannot contain spaces".to_string()]);
    }

    #[test]
    fn test_summary_lists_first_message_per_field() {
        let rules = RuleSet::new()
            .field("a", FieldRules::new("A").required().min_length(2))
            .field("b", FieldRules::new("B").required());
        let report = validate(&FormData::new(), &rules);
        assert_eq!(
            report.summary(),
            vec!["A is required".to_string(), "B is required".to_string()]
        );
    }
}
