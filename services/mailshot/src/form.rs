//! Field-descriptor driven forms
//!
//! Every form page declares a static table of [`FieldSpec`]s. The same table
//! drives rendering (labels and input kinds), input parsing through
//! [`Form::set`] and validation on submit, so no call site has to guess
//! whether a field is a checkbox or a text box.

use std::fmt;
use std::sync::LazyLock;

use chrono::DateTime;
use mailshot_api::models::Timestamp;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern compiles")
});

/// How a field is entered and stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Checkbox,
    /// Trusted HTML, kept verbatim
    Html,
    Date,
    /// Comma or space separated record ids
    Ids,
}

/// Constraint checked on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    EmailFormat,
}

/// One row of a form's descriptor table
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub validators: &'static [Validator],
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.validators.contains(&Validator::Required)
    }
}

/// Current value of a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Date(Option<Timestamp>),
    Ids(Vec<u64>),
}

impl FieldKind {
    fn empty(&self) -> FieldValue {
        match self {
            FieldKind::Checkbox => FieldValue::Flag(false),
            FieldKind::Date => FieldValue::Date(None),
            FieldKind::Ids => FieldValue::Ids(Vec::new()),
            _ => FieldValue::Text(String::new()),
        }
    }

    fn parse(&self, raw: &str) -> std::result::Result<FieldValue, &'static str> {
        match self {
            FieldKind::Checkbox => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "on" | "sim" | "s" | "yes" => Ok(FieldValue::Flag(true)),
                "false" | "0" | "off" | "não" | "nao" | "n" | "no" | "" => {
                    Ok(FieldValue::Flag(false))
                }
                _ => Err("Valor inválido"),
            },
            FieldKind::Date => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(FieldValue::Date(None));
                }
                DateTime::parse_from_rfc3339(raw)
                    .map(|at| FieldValue::Date(Some(at)))
                    .map_err(|_| "Data inválida")
            }
            FieldKind::Ids => raw
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<u64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(FieldValue::Ids)
                .map_err(|_| "Valor inválido"),
            FieldKind::Html | FieldKind::Password => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Text | FieldKind::Email => Ok(FieldValue::Text(raw.trim().to_string())),
        }
    }
}

/// A problem with one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Values for a descriptor table
#[derive(Debug, Clone)]
pub struct Form {
    fields: &'static [FieldSpec],
    values: Vec<FieldValue>,
}

impl Form {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            values: fields.iter().map(|f| f.kind.empty()).collect(),
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Parse raw input according to the field's kind
    pub fn set(&mut self, name: &str, raw: &str) -> std::result::Result<(), FieldError> {
        let idx = self.index(name).ok_or_else(|| FieldError {
            field: name.to_string(),
            message: "Campo desconhecido".to_string(),
        })?;
        let value = self.fields[idx].kind.parse(raw).map_err(|message| FieldError {
            field: name.to_string(),
            message: message.to_string(),
        })?;
        self.values[idx] = value;
        Ok(())
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.index(name).map(|idx| &self.values[idx])
    }

    /// Text of a text-like field, empty for anything else
    pub fn text(&self, name: &str) -> &str {
        match self.value(name) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.value(name), Some(FieldValue::Flag(true)))
    }

    pub fn date(&self, name: &str) -> Option<Timestamp> {
        match self.value(name) {
            Some(FieldValue::Date(at)) => *at,
            _ => None,
        }
    }

    pub fn ids(&self, name: &str) -> &[u64] {
        match self.value(name) {
            Some(FieldValue::Ids(ids)) => ids,
            _ => &[],
        }
    }

    /// Check every validator, in table order
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for (spec, value) in self.fields.iter().zip(&self.values) {
            for validator in spec.validators {
                if let Some(message) = check(*validator, value) {
                    errors.push(FieldError {
                        field: spec.name.to_string(),
                        message: message.to_string(),
                    });
                    break;
                }
            }
        }
        errors
    }

    /// First validation problem, labelled for display
    pub fn first_error(&self) -> Option<String> {
        let error = self.validate().into_iter().next()?;
        let label = self
            .fields
            .iter()
            .find(|f| f.name == error.field)
            .map_or(error.field.as_str(), |f| f.label);
        Some(format!("{}: {}", label, error.message))
    }

    /// Reset every field to its empty value
    pub fn clear(&mut self) {
        self.values = self.fields.iter().map(|f| f.kind.empty()).collect();
    }
}

fn check(validator: Validator, value: &FieldValue) -> Option<&'static str> {
    match (validator, value) {
        (Validator::Required, FieldValue::Text(text)) if text.trim().is_empty() => {
            Some("Campo obrigatório")
        }
        (Validator::Required, FieldValue::Date(None)) => Some("Campo obrigatório"),
        (Validator::Required, FieldValue::Ids(ids)) if ids.is_empty() => Some("Campo obrigatório"),
        (Validator::EmailFormat, FieldValue::Text(text))
            if !text.is_empty() && !EMAIL_RE.is_match(text) =>
        {
            Some("Email inválido")
        }
        _ => None,
    }
}
