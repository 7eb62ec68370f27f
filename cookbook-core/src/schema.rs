//! Declarative recipe schema and the generic validator that enforces it.
//!
//! Each schema is a static table of fields and their constraints. The client
//! validates its form candidate and the server validates request bodies through
//! the same tables, so the two sides apply one rule set.

use serde_json::Value;

use crate::error::{FieldError, ValidationErrors};
use crate::recipe::{Category, Difficulty, DurationUnit, TemperatureUnit, MAX_SERVINGS};

pub const TITLE_MAX_LEN: usize = 150;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const INGREDIENT_NAME_MAX_LEN: usize = 150;
pub const INSTRUCTION_MAX_LEN: usize = 2000;
pub const NOTE_MAX_LEN: usize = 500;

/// Upper bounds keep every number, and the cook time summed from durations,
/// finite on the wire.
pub const QUANTITY_MAX: f64 = 100_000.0;
pub const DURATION_MAX: f64 = 10_000.0;
pub const TEMPERATURE_MAX: f64 = 1_000.0;
pub const PREP_TIME_MAX: f64 = 10_000.0;

/// Constraint applied to a present value.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    /// A string. `non_empty` rejects blank strings, `max_len` counts characters.
    Text {
        non_empty: bool,
        max_len: Option<usize>,
    },
    /// Any JSON number within `min..=max`.
    Number { min: f64, max: f64 },
    /// A whole number within bounds.
    Integer { min: i64, max: Option<i64> },
    /// A string drawn from a closed set of codes.
    OneOf(&'static [&'static str]),
    /// An array of objects, each validated against `item`.
    ///
    /// When `sequence` names an item field, that field's values across the list
    /// must be exactly `1..=len`.
    List {
        min_items: usize,
        item: &'static Schema,
        sequence: Option<&'static str>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    /// Sibling that must be present and non-zero for this field to be allowed.
    pub companion: Option<&'static str>,
}

impl Field {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: true,
            companion: None,
        }
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: false,
            companion: None,
        }
    }

    pub const fn paired_with(mut self, companion: &'static str) -> Self {
        self.companion = Some(companion);
        self
    }
}

/// A whitelist of fields. Keys not listed are rejected.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub static INGREDIENT: Schema = Schema {
    name: "ingredient",
    fields: &[
        Field::required(
            "name",
            Kind::Text {
                non_empty: true,
                max_len: Some(INGREDIENT_NAME_MAX_LEN),
            },
        ),
        Field::required(
            "quantity",
            Kind::Number {
                min: 0.0,
                max: QUANTITY_MAX,
            },
        ),
        Field::required(
            "unit",
            Kind::Text {
                non_empty: true,
                max_len: None,
            },
        ),
    ],
};

pub static STEP: Schema = Schema {
    name: "step",
    fields: &[
        Field::required("order", Kind::Integer { min: 1, max: None }),
        Field::required(
            "instruction",
            Kind::Text {
                non_empty: true,
                max_len: Some(INSTRUCTION_MAX_LEN),
            },
        ),
        Field::optional(
            "duration",
            Kind::Number {
                min: 0.0,
                max: DURATION_MAX,
            },
        ),
        Field::optional("durationUnit", Kind::OneOf(DurationUnit::CODES)).paired_with("duration"),
        Field::optional(
            "temperature",
            Kind::Number {
                min: 0.0,
                max: TEMPERATURE_MAX,
            },
        ),
        Field::optional("temperatureUnit", Kind::OneOf(TemperatureUnit::CODES))
            .paired_with("temperature"),
        Field::optional(
            "note",
            Kind::Text {
                non_empty: false,
                max_len: Some(NOTE_MAX_LEN),
            },
        ),
    ],
};

/// Shape of a recipe on the wire. Creates enforce `required`; updates use
/// [`validate_partial`] against the same table.
pub static RECIPE: Schema = Schema {
    name: "recipe",
    fields: &[
        Field::required(
            "title",
            Kind::Text {
                non_empty: true,
                max_len: Some(TITLE_MAX_LEN),
            },
        ),
        Field::required(
            "description",
            Kind::Text {
                non_empty: true,
                max_len: Some(DESCRIPTION_MAX_LEN),
            },
        ),
        Field::required(
            "ingredients",
            Kind::List {
                min_items: 1,
                item: &INGREDIENT,
                sequence: None,
            },
        ),
        Field::required(
            "steps",
            Kind::List {
                min_items: 1,
                item: &STEP,
                sequence: Some("order"),
            },
        ),
        Field::optional(
            "servings",
            Kind::Integer {
                min: 1,
                max: Some(MAX_SERVINGS as i64),
            },
        ),
        Field::optional(
            "prepTime",
            Kind::Number {
                min: 0.0,
                max: PREP_TIME_MAX,
            },
        ),
        Field::optional("difficulty", Kind::OneOf(Difficulty::CODES)),
        Field::optional("category", Kind::OneOf(Category::CODES)),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Enforce,
    Relaxed,
}

/// Validates a complete candidate: required fields must be present.
pub fn validate(schema: &Schema, candidate: &Value) -> Result<(), ValidationErrors> {
    run(schema, candidate, Presence::Enforce)
}

/// Validates a partial candidate: top-level fields may be absent, but whatever
/// is present (including every nested item) must satisfy the full rules.
pub fn validate_partial(schema: &Schema, candidate: &Value) -> Result<(), ValidationErrors> {
    run(schema, candidate, Presence::Relaxed)
}

fn run(schema: &Schema, candidate: &Value, presence: Presence) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    check_object(schema, candidate, "", presence, &mut errors);
    match ValidationErrors::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn check_object(
    schema: &Schema,
    value: &Value,
    path: &str,
    presence: Presence,
    errors: &mut Vec<FieldError>,
) {
    let Some(object) = value.as_object() else {
        let path = if path.is_empty() { "body" } else { path };
        errors.push(FieldError::new(path, "must be an object"));
        return;
    };

    for key in object.keys() {
        if schema.field(key).is_none() {
            errors.push(FieldError::new(join(path, key), "should not exist"));
        }
    }

    for field in schema.fields {
        let field_path = join(path, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required && presence == Presence::Enforce {
                    errors.push(FieldError::new(field_path, "is required"));
                }
            }
            Some(value) => {
                check_kind(field.kind, value, &field_path, errors);
                if let Some(companion) = field.companion {
                    if !is_non_zero(object.get(companion)) {
                        errors.push(FieldError::new(
                            field_path,
                            format!("requires a non-zero {}", companion),
                        ));
                    }
                }
            }
        }
    }
}

fn check_kind(kind: Kind, value: &Value, path: &str, errors: &mut Vec<FieldError>) {
    match kind {
        Kind::Text { non_empty, max_len } => match value.as_str() {
            None => errors.push(FieldError::new(path, "must be a string")),
            Some(text) => {
                if non_empty && text.trim().is_empty() {
                    errors.push(FieldError::new(path, "must not be empty"));
                } else if let Some(max) = max_len {
                    if text.chars().count() > max {
                        errors.push(FieldError::new(
                            path,
                            format!("must not exceed {} characters", max),
                        ));
                    }
                }
            }
        },
        Kind::Number { min, max } => match value.as_f64() {
            None => errors.push(FieldError::new(path, "must be a number")),
            Some(n) if n < min => {
                errors.push(FieldError::new(path, format!("must not be less than {}", min)))
            }
            Some(n) if n > max => errors.push(FieldError::new(
                path,
                format!("must not be greater than {}", max),
            )),
            Some(_) => {}
        },
        Kind::Integer { min, max } => match value.as_i64() {
            None => errors.push(FieldError::new(path, "must be an integer")),
            Some(n) if n < min => {
                errors.push(FieldError::new(path, format!("must not be less than {}", min)))
            }
            Some(n) => {
                if let Some(max) = max {
                    if n > max {
                        errors.push(FieldError::new(
                            path,
                            format!("must not be greater than {}", max),
                        ));
                    }
                }
            }
        },
        Kind::OneOf(codes) => match value.as_str() {
            Some(code) if codes.contains(&code) => {}
            _ => errors.push(FieldError::new(
                path,
                format!("must be one of: {}", codes.join(", ")),
            )),
        },
        Kind::List {
            min_items,
            item,
            sequence,
        } => match value.as_array() {
            None => errors.push(FieldError::new(path, "must be an array")),
            Some(items) => {
                if items.len() < min_items {
                    errors.push(FieldError::new(
                        path,
                        format!("must contain at least {} element(s)", min_items),
                    ));
                }
                for (index, entry) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, index);
                    check_object(item, entry, &item_path, Presence::Enforce, errors);
                }
                if let Some(key) = sequence {
                    check_sequence(items, key, path, errors);
                }
            }
        },
    }
}

/// Values of `key` must be a permutation of `1..=items.len()`.
fn check_sequence(items: &[Value], key: &str, path: &str, errors: &mut Vec<FieldError>) {
    if items.is_empty() {
        return;
    }
    let mut values: Vec<i64> = items
        .iter()
        .filter_map(|item| item.get(key).and_then(Value::as_i64))
        .collect();
    // Missing or mistyped values were already reported per item.
    if values.len() != items.len() {
        return;
    }
    values.sort_unstable();
    let contiguous = values
        .iter()
        .enumerate()
        .all(|(index, value)| *value == index as i64 + 1);
    if !contiguous {
        errors.push(FieldError::new(
            path,
            format!("{} values must form the sequence 1..{}", key, items.len()),
        ));
    }
}

fn is_non_zero(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_f64)
        .map(|n| n != 0.0)
        .unwrap_or(false)
}
