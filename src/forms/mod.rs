//! Input forms. Every record type describes its fields once; the same list
//! drives rendering and validation, and nothing reaches a repository before it
//! passes [`FormInput::from_form`].

mod records;

use std::{collections::HashMap, sync::LazyLock};

use jiff::civil::{Date, Time};
use regex::Regex;
use serde::Deserialize;

use crate::error::ValidationError;

pub const ID_MAX: i32 = 999_999;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Integer { min: i32, max: i32 },
    Decimal,
    Date,
    Time,
    Choice(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    /// Pre-filled in the form and used when an optional field is left blank.
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false, placeholder: "", default: "" }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn integer(name: &'static str, label: &'static str, min: i32, max: i32) -> Self {
        Self::new(name, label, FieldKind::Integer { min, max })
    }

    /// A key into another table.
    pub const fn id(name: &'static str, label: &'static str) -> Self {
        Self::integer(name, label, 1, ID_MAX).required()
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(options)).or(options[0])
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn hint(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub const fn or(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }
}

/// Submitted form fields by name, as posted by the browser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", |value| value.trim())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

pub trait FormInput: Sized {
    fn fields() -> &'static [FieldSpec];

    /// Fields that make up a composite key. They stay read-only while editing.
    fn key_fields() -> &'static [&'static str] {
        &[]
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError>;

    /// The record as raw form input, for pre-filling the edit form.
    fn to_form(&self) -> FormValues;
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Typed reads of submitted values, checked against the field list.
struct Reader<'a> {
    fields: &'static [FieldSpec],
    values: &'a FormValues,
}

impl<'a> Reader<'a> {
    fn new(fields: &'static [FieldSpec], values: &'a FormValues) -> Self {
        Self { fields, values }
    }

    fn spec(&self, name: &'static str) -> FieldSpec {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .copied()
            .unwrap_or(FieldSpec::text(name, name))
    }

    /// The submitted value, or the field default when blank. `None` when still blank.
    fn raw(&self, spec: &FieldSpec) -> Result<Option<&'a str>, ValidationError> {
        let value = self.values.get(spec.name);
        let value = if value.is_empty() { spec.default } else { value };
        match (value.is_empty(), spec.required) {
            (true, true) => Err(ValidationError::Required(spec.label)),
            (true, false) => Ok(None),
            (false, _) => Ok(Some(value)),
        }
    }

    fn text(&self, name: &'static str) -> Result<String, ValidationError> {
        let spec = self.spec(name);
        Ok(self.raw(&spec)?.unwrap_or_default().to_string())
    }

    fn email(&self, name: &'static str) -> Result<String, ValidationError> {
        let spec = self.spec(name);
        let value = self.text(name)?;
        if !EMAIL.is_match(&value) {
            return Err(ValidationError::Email(spec.label));
        }
        Ok(value)
    }

    fn optional_integer(&self, name: &'static str) -> Result<Option<i32>, ValidationError> {
        let spec = self.spec(name);
        let Some(raw) = self.raw(&spec)? else {
            return Ok(None);
        };
        let value: i32 = raw.parse().map_err(|_| ValidationError::Number(spec.label))?;
        if let FieldKind::Integer { min, max } = spec.kind {
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange { label: spec.label, min, max });
            }
        }
        Ok(Some(value))
    }

    fn integer(&self, name: &'static str) -> Result<i32, ValidationError> {
        let spec = self.spec(name);
        self.optional_integer(name)?.ok_or(ValidationError::Required(spec.label))
    }

    fn decimal(&self, name: &'static str) -> Result<f64, ValidationError> {
        let spec = self.spec(name);
        let raw = self.raw(&spec)?.ok_or(ValidationError::Required(spec.label))?;
        let value: f64 = raw.parse().map_err(|_| ValidationError::Number(spec.label))?;
        if !value.is_finite() {
            return Err(ValidationError::Number(spec.label));
        }
        if value < 0.0 {
            return Err(ValidationError::Negative(spec.label));
        }
        Ok(value)
    }

    fn optional_date(&self, name: &'static str) -> Result<Option<Date>, ValidationError> {
        let spec = self.spec(name);
        let Some(raw) = self.raw(&spec)? else {
            return Ok(None);
        };
        Date::strptime("%Y-%m-%d", raw).map(Some).map_err(|_| ValidationError::Date(spec.label))
    }

    fn date(&self, name: &'static str) -> Result<Date, ValidationError> {
        let spec = self.spec(name);
        self.optional_date(name)?.ok_or(ValidationError::Required(spec.label))
    }

    fn date_or_today(&self, name: &'static str) -> Result<Date, ValidationError> {
        Ok(self.optional_date(name)?.unwrap_or_else(|| jiff::Zoned::now().date()))
    }

    /// Normalised to `HH:MM`.
    fn time(&self, name: &'static str) -> Result<String, ValidationError> {
        let spec = self.spec(name);
        let raw = self.raw(&spec)?.ok_or(ValidationError::Required(spec.label))?;
        let time = Time::strptime("%H:%M", raw).map_err(|_| ValidationError::Time(spec.label))?;
        Ok(time.strftime("%H:%M").to_string())
    }

    fn choice(&self, name: &'static str) -> Result<String, ValidationError> {
        let spec = self.spec(name);
        let value = self.text(name)?;
        match spec.kind {
            FieldKind::Choice(options) if !options.contains(&value.as_str()) => {
                Err(ValidationError::Choice(spec.label))
            },
            _ => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::integer("age", "Age", 0, 120),
        FieldSpec::new("price", "Price", FieldKind::Decimal).required().or("5000"),
        FieldSpec::new("day", "Date", FieldKind::Date),
        FieldSpec::new("at", "Time", FieldKind::Time).required(),
        FieldSpec::choice("kind", "Type", &["General", "Student"]),
    ];

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn blank_required_text_is_rejected_and_values_are_trimmed() {
        let form = values(&[("name", "   ")]);
        let reader = Reader::new(FIELDS, &form);
        assert_eq!(reader.text("name"), Err(ValidationError::Required("Name")));

        let form = values(&[("name", "  Ana  ")]);
        assert_eq!(Reader::new(FIELDS, &form).text("name").unwrap(), "Ana");
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["ana", "ana@", "ana@example", "a na@example.com", "@example.com"] {
            let form = values(&[("email", bad)]);
            assert_eq!(
                Reader::new(FIELDS, &form).email("email"),
                Err(ValidationError::Email("Email")),
                "{bad}"
            );
        }
        let form = values(&[("email", "ana@example.com")]);
        assert_eq!(Reader::new(FIELDS, &form).email("email").unwrap(), "ana@example.com");
    }

    #[test]
    fn integers_respect_their_range() {
        let read = |raw: &str| {
            let form = values(&[("age", raw)]);
            Reader::new(FIELDS, &form).optional_integer("age")
        };
        assert_eq!(read(""), Ok(None));
        assert_eq!(read("33"), Ok(Some(33)));
        let out_of_range = ValidationError::OutOfRange { label: "Age", min: 0, max: 120 };
        assert_eq!(read("121"), Err(out_of_range));
        assert_eq!(read("veinte"), Err(ValidationError::Number("Age")));
    }

    #[test]
    fn decimals_fall_back_to_default_and_reject_negatives() {
        let read = |raw: &str| {
            let form = values(&[("price", raw)]);
            Reader::new(FIELDS, &form).decimal("price")
        };
        assert_eq!(read(""), Ok(5000.0));
        assert_eq!(read("4500.5"), Ok(4500.5));
        assert_eq!(read("-1"), Err(ValidationError::Negative("Price")));
        assert_eq!(read("NaN"), Err(ValidationError::Number("Price")));
    }

    #[test]
    fn dates_and_times_use_fixed_formats() {
        let form = values(&[("day", "2025-03-14"), ("at", "09:05")]);
        let reader = Reader::new(FIELDS, &form);
        assert_eq!(reader.date("day").unwrap(), jiff::civil::date(2025, 3, 14));
        assert_eq!(reader.time("at").unwrap(), "09:05");

        let form = values(&[("day", "14/03/2025"), ("at", "25:00")]);
        let reader = Reader::new(FIELDS, &form);
        assert_eq!(reader.optional_date("day"), Err(ValidationError::Date("Date")));
        assert_eq!(reader.time("at"), Err(ValidationError::Time("Time")));

        let empty = FormValues::default();
        assert_eq!(Reader::new(FIELDS, &empty).optional_date("day"), Ok(None));
    }

    #[test]
    fn choices_default_to_the_first_option() {
        let empty = FormValues::default();
        assert_eq!(Reader::new(FIELDS, &empty).choice("kind").unwrap(), "General");

        let form = values(&[("kind", "Press")]);
        let reader = Reader::new(FIELDS, &form);
        assert_eq!(reader.choice("kind"), Err(ValidationError::Choice("Type")));
    }
}
