//! Variant reconciler
//!
//! Merges a freshly generated combination list into the previous variant
//! list by identity key. Price and images follow the key, so edits survive
//! any change to the selection that keeps the combination alive.

use serde::{Deserialize, Serialize};
use shared::models::ImageRef;
use std::collections::HashMap;
use tracing::debug;

use crate::combination::{Combination, VariantKey};

/// A sellable configuration: combination plus per-variant price and images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub combination: Combination,
    /// Price in currency unit, >= 0
    pub price: f64,
    pub images: Vec<ImageRef>,
}

impl Variant {
    /// Fresh variant with default price and no images
    pub fn new(combination: Combination) -> Self {
        Self {
            combination,
            price: 0.0,
            images: Vec::new(),
        }
    }

    pub fn key(&self) -> VariantKey {
        self.combination.key()
    }
}

/// Reconcile `combinations` against `previous`.
///
/// The result has exactly one variant per combination, in combination order.
/// Matching previous variants keep price and images but take the new
/// combination (labels may have changed); unmatched ones are dropped.
pub fn reconcile(combinations: Vec<Combination>, previous: Vec<Variant>) -> Vec<Variant> {
    let previous_len = previous.len();
    let mut by_key: HashMap<VariantKey, Variant> = HashMap::with_capacity(previous_len);
    for variant in previous {
        by_key.entry(variant.key()).or_insert(variant);
    }

    let mut kept = 0usize;
    let variants: Vec<Variant> = combinations
        .into_iter()
        .map(|combination| match by_key.remove(&combination.key()) {
            Some(existing) => {
                kept += 1;
                Variant {
                    combination,
                    price: existing.price,
                    images: existing.images,
                }
            }
            None => Variant::new(combination),
        })
        .collect();

    debug!(
        total = variants.len(),
        kept,
        added = variants.len() - kept,
        dropped = previous_len - kept,
        "Variants reconciled"
    );

    variants
}
