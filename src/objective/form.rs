//! Form field codec
//!
//! The form is the wire format between the rendered objective rows and the
//! store. Every input is named `{field}{index}`, e.g. `fun3` or `name0`,
//! where `field` is `name` or an axis name and `index` is the display
//! position of the objective.

use std::sync::OnceLock;

use regex::Regex;

use super::types::{clamp_unit, Axis, Objective};

/// Indices above this bound are dropped instead of allocating a huge list.
pub const MAX_FORM_INDEX: usize = 10_000;

/// Which part of an objective a form field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Axis(Axis),
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Axis(axis) => axis.as_str(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name == "name" {
            return Some(FormField::Name);
        }
        Axis::from_name(name).map(FormField::Axis)
    }

    /// All fields in the order a row renders them
    pub fn all() -> [FormField; 5] {
        [
            FormField::Name,
            FormField::Axis(Axis::Achievement),
            FormField::Axis(Axis::Fun),
            FormField::Axis(Axis::Impact),
            FormField::Axis(Axis::Ease),
        ]
    }
}

/// A decoded form field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub field: FormField,
    pub index: usize,
}

impl FieldKey {
    pub fn new(field: FormField, index: usize) -> Self {
        Self { field, index }
    }

    /// Encode as a form field name
    pub fn encode(&self) -> String {
        field_name(self.field, self.index)
    }
}

/// Build the form field name for one field of the objective at `index`
pub fn field_name(field: FormField, index: usize) -> String {
    format!("{}{}", field.as_str(), index)
}

fn letters_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[a-z]+").expect("valid field name pattern"))
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid field index pattern"))
}

/// Decode a form field name
///
/// The field is the first run of letters and the index the first run of
/// digits. Returns `None` for unknown fields and for keys without a usable
/// index.
pub fn parse_field_key(key: &str) -> Option<FieldKey> {
    let field = letters_re().find(key)?;
    let field = FormField::from_name(field.as_str())?;

    let index = digits_re().find(key)?.as_str().parse::<usize>().ok()?;
    if index > MAX_FORM_INDEX {
        return None;
    }

    Some(FieldKey { field, index })
}

/// Flat snapshot of a form's `(key, value)` entries in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    entries: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append one entry
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode every entry with a recognised key into `(field, index, value)`
    pub fn triples(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, value)| parse_field_key(key).map(|k| (k, value.as_str())))
    }

    /// Render objectives into the form entries the templating layer emits
    pub fn from_objectives(objectives: &[Objective]) -> Self {
        let mut snapshot = Self::new();
        for (index, objective) in objectives.iter().enumerate() {
            for field in FormField::all() {
                let value = match field {
                    FormField::Name => objective.name.clone(),
                    FormField::Axis(axis) => objective.axis(axis).to_string(),
                };
                snapshot.push(field_name(field, index), value);
            }
        }
        snapshot
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a directly entered axis value
///
/// Unparseable text becomes 0; numbers are clamped into [0, 1].
pub fn parse_form_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map(clamp_unit).unwrap_or(0.0)
}

/// Rebuild the whole objective list from a form snapshot
///
/// The previous list is not consulted. Each referenced index starts from
/// `Objective::new_default(index)`; indices that no entry references but that
/// lie below the highest referenced one are filled with defaults as well.
pub fn load_from_form(snapshot: &FormSnapshot) -> Vec<Objective> {
    let mut slots: Vec<Option<Objective>> = Vec::new();

    for (key, value) in snapshot.triples() {
        if slots.len() <= key.index {
            slots.resize(key.index + 1, None);
        }
        let objective = slots[key.index].get_or_insert_with(|| Objective::new_default(key.index));

        match key.field {
            FormField::Name => objective.name = value.to_string(),
            FormField::Axis(axis) => objective.set_axis(axis, parse_form_number(value)),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.unwrap_or_else(|| Objective::new_default(index)))
        .collect()
}
