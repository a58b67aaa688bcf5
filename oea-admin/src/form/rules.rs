//! Draft rules
//!
//! Rules subscribe to field-change notifications from the controller
//! and keep derived state authoritative for the lifetime of the form.

use super::draft::FormState;

/// Paths within the draft a rule can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    ProductName,
    ProductDescription,
    ProductTags,
    ProductImages,
    InventoryNumber,
    InventoryQuantity,
    ExchangeRate,
    CostPrice,
    ProductPrice,
    Variants,
}

/// A reactive rule over the draft.
///
/// Fired synchronously after every mutation, with the path that
/// changed; rules write directly into the form state.
pub trait DraftRule: Send + Sync {
    fn apply(&self, changed: FieldPath, state: &mut FormState);
}

/// Keeps `inventory_quantity` equal to the summed variant stock.
///
/// While variants exist the field is overwritten on every change and
/// locked against direct edits. When the last variant is removed the
/// field unlocks but keeps its last computed value.
#[derive(Debug, Default)]
pub struct DerivedQuantityRule;

impl DraftRule for DerivedQuantityRule {
    fn apply(&self, changed: FieldPath, state: &mut FormState) {
        if changed != FieldPath::Variants {
            return;
        }

        if state.draft.variants.is_empty() {
            state.quantity_editable = true;
            return;
        }

        let total: i64 = state
            .draft
            .variants
            .iter()
            .map(|variant| variant.stock.max(0))
            .sum();

        state.draft.inventory_quantity = total;
        state.quantity_editable = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::Variant;

    fn fire(state: &mut FormState) {
        DerivedQuantityRule.apply(FieldPath::Variants, state);
    }

    #[test]
    fn test_quantity_tracks_variant_stock() {
        let mut state = FormState::default();
        state.draft.variants.push(Variant::new("S", 3, Decimal::ZERO));
        state.draft.variants.push(Variant::new("M", 7, Decimal::ZERO));

        fire(&mut state);
        assert_eq!(state.draft.inventory_quantity, 10);
        assert!(!state.quantity_editable);
    }

    #[test]
    fn test_negative_stock_counts_as_zero() {
        let mut state = FormState::default();
        state.draft.variants.push(Variant::new("S", -4, Decimal::ZERO));
        state.draft.variants.push(Variant::new("M", 6, Decimal::ZERO));

        fire(&mut state);
        assert_eq!(state.draft.inventory_quantity, 6);
    }

    #[test]
    fn test_unlocks_and_retains_value_when_variants_empty() {
        let mut state = FormState::default();
        state.draft.variants.push(Variant::new("S", 5, Decimal::ZERO));
        fire(&mut state);
        assert_eq!(state.draft.inventory_quantity, 5);
        assert!(!state.quantity_editable);

        state.draft.variants.clear();
        fire(&mut state);
        assert_eq!(state.draft.inventory_quantity, 5, "last computed value is kept");
        assert!(state.quantity_editable);
    }

    #[test]
    fn test_ignores_unrelated_paths() {
        let mut state = FormState::default();
        state.draft.inventory_quantity = 42;
        state.draft.variants.push(Variant::new("S", 1, Decimal::ZERO));

        DerivedQuantityRule.apply(FieldPath::ProductName, &mut state);
        assert_eq!(state.draft.inventory_quantity, 42);
        assert!(state.quantity_editable);
    }
}
