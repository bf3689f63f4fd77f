//! HTML form payloads and their validation rules.
//!
//! Forms are built from raw `(name, value)` pairs. Every field defaults to
//! empty, so a post with missing fields is reported through validation
//! errors instead of a rejected request. Values are trimmed and a repeated
//! field keeps its last value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

const REQUIRED_MESSAGE: &str = "This field is required.";

/// Field access shared by the HTML forms.
pub trait FormFields {
    /// Fields that must be non-blank, with their current values.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// Store a submitted value. Unknown field names are ignored.
    fn set_field(&mut self, name: &str, value: String);
}

/// Recommend-a-post form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmailPostForm {
    #[validate(length(max = 25, message = "Ensure this value has at most 25 characters."))]
    pub name: String,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this value has at most 254 characters.")
    )]
    pub email: String,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this value has at most 254 characters.")
    )]
    pub to: String,

    pub comments: String,
}

impl FormFields for EmailPostForm {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name), ("email", &self.email), ("to", &self.to)]
    }

    fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            "to" => self.to = value,
            "comments" => self.comments = value,
            _ => {}
        }
    }
}

/// Comment submission form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(max = 80, message = "Ensure this value has at most 80 characters."))]
    pub name: String,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this value has at most 254 characters.")
    )]
    pub email: String,

    pub body: String,
}

impl FormFields for CommentForm {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name), ("email", &self.email), ("body", &self.body)]
    }

    fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            "body" => self.body = value,
            _ => {}
        }
    }
}

/// Validation messages keyed by field name.
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// A form together with the outcome of validating it, ready for a template.
#[derive(Debug, Clone, Serialize)]
pub struct BoundForm<T> {
    pub data: T,
    pub errors: FormErrors,
    pub is_bound: bool,
}

impl<T: Validate + FormFields + Default> BoundForm<T> {
    /// An empty form that has not been submitted.
    pub fn unbound() -> Self {
        Self {
            data: T::default(),
            errors: FormErrors::new(),
            is_bound: false,
        }
    }

    /// Bind submitted data and validate it.
    ///
    /// A blank required field only reports "required"; the field's other
    /// rules are checked once it has a value.
    pub fn bind(data: T) -> Self {
        let mut errors: FormErrors = data
            .required_fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| (field.to_string(), vec![REQUIRED_MESSAGE.to_string()]))
            .collect();

        if let Err(e) = data.validate() {
            for (field, messages) in collect_errors(&e) {
                errors.entry(field).or_insert(messages);
            }
        }

        Self {
            data,
            errors,
            is_bound: true,
        }
    }

    /// Build the form from submitted pairs, then bind it.
    pub fn bind_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut data = T::default();
        for (name, value) in fields {
            data.set_field(name.as_ref(), value.as_ref().trim().to_string());
        }
        Self::bind(data)
    }

    pub fn is_valid(&self) -> bool {
        self.is_bound && self.errors.is_empty()
    }
}

fn collect_errors(errors: &ValidationErrors) -> FormErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
