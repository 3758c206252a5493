//! Accumulated interview answers for one wizard session.

use std::collections::BTreeMap;

use super::steps::{FieldKey, STEP_COUNT};

/// The answers collected so far, one string per field key.
///
/// Values are only ever replaced through [`FormState::set`]; nothing
/// clears the store partially, and it lives exactly as long as the
/// session that owns it. No validation happens here; that is the
/// validation gate's job, kept separate so the rules can be tested
/// without any storage or UI involved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: [String; STEP_COUNT],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value for a field.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values[Self::slot(key)] = value.into();
    }

    /// Read the current value for a field (empty string until set).
    pub fn get(&self, key: FieldKey) -> &str {
        &self.values[Self::slot(key)]
    }

    /// All values keyed by their stable field name, for payloads and logs.
    pub fn as_map(&self) -> BTreeMap<&'static str, &str> {
        FieldKey::all()
            .iter()
            .map(|&key| (key.name(), self.get(key)))
            .collect()
    }

    fn slot(key: FieldKey) -> usize {
        match key {
            FieldKey::Product => 0,
            FieldKey::Persona => 1,
            FieldKey::Industry => 2,
            FieldKey::Goal => 3,
            FieldKey::Tone => 4,
            FieldKey::Objections => 5,
        }
    }
}
