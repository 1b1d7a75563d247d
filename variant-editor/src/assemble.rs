//! Variant record assembler
//!
//! Turns reconciled variants into final payloads: SKU suffix, normalized
//! price, combination values, then the scalar attribute values shared by
//! every variant.

use shared::models::{Attribute, VariantAttribute, VariantPayload};
use shared::util::normalize_price;

use crate::reconcile::Variant;
use crate::selection::SelectionState;

/// SKU of the `index`-th (0-based) variant of one submission
pub fn variant_sku(sku_base: &str, index: usize) -> String {
    format!("{}-{}", sku_base, index + 1)
}

/// Assemble submission payloads.
///
/// `attributes` is the attribute list of the set; options attributes in it
/// are skipped, the rest contribute one `{label, value}` each in set order
/// (value `None` when unset). With no variants at all, a single scalar-only
/// payload is produced so the product is never dropped.
pub fn assemble(
    variants: &[Variant],
    attributes: &[Attribute],
    selections: &SelectionState,
    sku_base: &str,
) -> Vec<VariantPayload> {
    let scalars: Vec<VariantAttribute> = attributes
        .iter()
        .filter(|a| !a.is_options())
        .map(|a| VariantAttribute::new(a.label.clone(), selections.scalar(&a.id).cloned()))
        .collect();

    if variants.is_empty() {
        return vec![VariantPayload {
            sku: variant_sku(sku_base, 0),
            price: 0.0,
            images: Vec::new(),
            attributes: scalars,
        }];
    }

    variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let mut entries: Vec<VariantAttribute> = variant
                .combination
                .entries()
                .iter()
                .map(|e| VariantAttribute::new(e.label.clone(), Some(e.value.clone().into())))
                .collect();
            entries.extend(scalars.iter().cloned());

            VariantPayload {
                sku: variant_sku(sku_base, i),
                price: normalize_price(variant.price),
                images: variant.images.clone(),
                attributes: entries,
            }
        })
        .collect()
}
