//! Combination generator
//!
//! Computes the cartesian product of the selected values of options
//! attributes. The first attribute varies slowest, values follow selection
//! order. Attributes without any selected value are left out of the product
//! instead of zeroing it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::models::Attribute;

use crate::selection::SelectionState;

/// One `(attribute, value)` coordinate of a combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationEntry {
    pub attribute_id: String,
    pub label: String,
    pub value: String,
}

/// Ordered coordinates of one variant, in attribute-set order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<CombinationEntry>);

impl Combination {
    pub fn new(entries: Vec<CombinationEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[CombinationEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identity of the variant built from this combination
    pub fn key(&self) -> VariantKey {
        VariantKey(
            self.0
                .iter()
                .map(|e| (e.attribute_id.clone(), e.value.clone()))
                .collect(),
        )
    }

    /// Human readable form, e.g. `Color: Red, Size: S`
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}: {}", e.label, e.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Identity key of a variant: ordered `(attribute id, value)` pairs.
///
/// Labels are not part of the identity, so relabelling an attribute keeps
/// the variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey(Vec<(String, String)>);

impl VariantKey {
    pub fn new<I, A, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, V)>,
        A: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(a, v)| (a.into(), v.into()))
                .collect(),
        )
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Content-addressed id, stable across sessions.
    ///
    /// Every field is length-prefixed so values containing separators cannot
    /// collide.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (attribute_id, value) in &self.0 {
            hasher.update((attribute_id.len() as u64).to_le_bytes());
            hasher.update(attribute_id.as_bytes());
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        let digest = hasher.finalize();
        hex::encode(&digest[..16])
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "()");
        }
        for (i, (attribute_id, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{attribute_id}={value:?}")?;
        }
        Ok(())
    }
}

struct Axis<'a> {
    attribute: &'a Attribute,
    values: &'a [String],
}

/// Lazy cartesian product over the selected option values.
///
/// Works like an odometer: the last axis turns fastest.
pub struct Combinations<'a> {
    axes: Vec<Axis<'a>>,
    cursor: Option<Vec<usize>>,
    remaining: usize,
}

impl<'a> Combinations<'a> {
    pub fn new<I>(option_attributes: I, selections: &'a SelectionState) -> Self
    where
        I: IntoIterator<Item = &'a Attribute>,
    {
        let axes: Vec<Axis<'a>> = option_attributes
            .into_iter()
            .map(|attribute| Axis {
                attribute,
                values: selections.options(&attribute.id),
            })
            .filter(|axis| !axis.values.is_empty())
            .collect();

        let (cursor, remaining) = if axes.is_empty() {
            (None, 0)
        } else {
            let total = axes
                .iter()
                .map(|a| a.values.len())
                .fold(1usize, usize::saturating_mul);
            (Some(vec![0; axes.len()]), total)
        };

        Self {
            axes,
            cursor,
            remaining,
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        let cursor = self.cursor.as_mut()?;

        let combination = Combination(
            self.axes
                .iter()
                .zip(cursor.iter())
                .map(|(axis, &idx)| CombinationEntry {
                    attribute_id: axis.attribute.id.clone(),
                    label: axis.attribute.label.clone(),
                    value: axis.values[idx].clone(),
                })
                .collect(),
        );

        let mut exhausted = true;
        for (axis, idx) in self.axes.iter().zip(cursor.iter_mut()).rev() {
            *idx += 1;
            if *idx < axis.values.len() {
                exhausted = false;
                break;
            }
            *idx = 0;
        }
        if exhausted {
            self.cursor = None;
        }
        self.remaining = self.remaining.saturating_sub(1);

        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

/// Generate every combination of the currently selected option values.
///
/// Returns an empty list when no options attribute has a selection.
pub fn generate<'a, I>(option_attributes: I, selections: &'a SelectionState) -> Vec<Combination>
where
    I: IntoIterator<Item = &'a Attribute>,
{
    Combinations::new(option_attributes, selections).collect()
}
