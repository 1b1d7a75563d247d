//! Operator selection state
//!
//! One entry per attribute id: a scalar value for string/number/boolean
//! attributes, an insertion-ordered set of chosen values for options
//! attributes. Kind checks against the attribute set live in the editor;
//! this type only keeps the values consistent (no duplicate options).

use serde::{Deserialize, Serialize};
use shared::models::AttributeValue;
use std::collections::HashMap;

/// Value held for one attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Chosen option values, in the order they were selected
    Options(Vec<String>),
    Scalar(AttributeValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    values: HashMap<String, Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, attribute_id: &str) -> Option<&Selection> {
        self.values.get(attribute_id)
    }

    /// Current scalar value, `None` if unset or not a scalar
    pub fn scalar(&self, attribute_id: &str) -> Option<&AttributeValue> {
        match self.values.get(attribute_id) {
            Some(Selection::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    /// Selected option values in selection order (empty if none)
    pub fn options(&self, attribute_id: &str) -> &[String] {
        match self.values.get(attribute_id) {
            Some(Selection::Options(values)) => values,
            _ => &[],
        }
    }

    pub fn set_scalar(&mut self, attribute_id: impl Into<String>, value: AttributeValue) {
        self.values
            .insert(attribute_id.into(), Selection::Scalar(value));
    }

    /// Toggle one option value: appended when absent, removed when present.
    ///
    /// Returns `true` if the value is selected afterwards.
    pub fn toggle_option(&mut self, attribute_id: &str, value: &str) -> bool {
        let mut values = match self.values.remove(attribute_id) {
            Some(Selection::Options(values)) => values,
            _ => Vec::new(),
        };

        let selected = match values.iter().position(|v| v == value) {
            Some(idx) => {
                values.remove(idx);
                false
            }
            None => {
                values.push(value.to_string());
                true
            }
        };
        self.values
            .insert(attribute_id.to_string(), Selection::Options(values));
        selected
    }

    /// Replace the selected values of an options attribute, dropping duplicates
    pub fn set_options<I, S>(&mut self, attribute_id: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        self.values
            .insert(attribute_id.into(), Selection::Options(unique));
    }

    /// Forget the value of one attribute
    pub fn clear(&mut self, attribute_id: &str) -> Option<Selection> {
        self.values.remove(attribute_id)
    }

    pub fn clear_all(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_appends_then_removes() {
        let mut state = SelectionState::new();
        assert!(state.toggle_option("color", "Blue"));
        assert!(state.toggle_option("color", "Red"));
        assert_eq!(state.options("color"), ["Blue", "Red"]);

        assert!(!state.toggle_option("color", "Blue"));
        assert_eq!(state.options("color"), ["Red"]);

        assert!(state.toggle_option("color", "Blue"));
        assert_eq!(state.options("color"), ["Red", "Blue"]);
    }

    #[test]
    fn test_set_options_dedupes_in_order() {
        let mut state = SelectionState::new();
        state.set_options("size", ["M", "S", "M", "L"]);
        assert_eq!(state.options("size"), ["M", "S", "L"]);
    }

    #[test]
    fn test_scalar_and_options_do_not_mix() {
        let mut state = SelectionState::new();
        state.set_scalar("material", "Cotton".into());
        assert_eq!(state.scalar("material"), Some(&AttributeValue::from("Cotton")));
        assert!(state.options("material").is_empty());

        state.toggle_option("material", "x");
        assert!(state.scalar("material").is_none());
        assert_eq!(state.options("material"), ["x"]);
    }

    #[test]
    fn test_clear() {
        let mut state = SelectionState::new();
        state.set_scalar("flag", true.into());
        assert!(state.clear("flag").is_some());
        assert!(state.is_empty());
        assert!(state.scalar("flag").is_none());
    }
}
