//! Plan upgrade eligibility.
//!
//! A plan change counts as an upgrade only within a single product set, and
//! only when the target plan's order is strictly higher. Pure metadata
//! comparison; no network.

use crate::error::{Result, SubgateError};
use crate::models::ProductMetadata;

/// Decide whether moving from `current` to `target` plan metadata is an
/// upgrade.
///
/// Both plans must carry metadata, and any metadata that names a product set
/// must also carry a parseable `productSetOrder`; otherwise the plan is
/// treated as unknown. Plans in different (or unnamed) product sets are
/// never upgrades of each other.
pub fn is_plan_upgrade(
    current: Option<&ProductMetadata>,
    target: Option<&ProductMetadata>,
) -> Result<bool> {
    let (current, target) = match (current, target) {
        (Some(current), Some(target)) => (current, target),
        _ => return Err(SubgateError::UnknownSubscriptionPlan { plan_id: None }),
    };

    let current_set = current.product_set.as_deref().unwrap_or("");
    let target_set = target.product_set.as_deref().unwrap_or("");
    if current_set.is_empty() || current_set != target_set {
        return Ok(false);
    }

    let current_order = parse_order(current.product_set_order.as_deref())?;
    let target_order = parse_order(target.product_set_order.as_deref())?;
    Ok(current_order < target_order)
}

fn parse_order(order: Option<&str>) -> Result<i64> {
    order
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or(SubgateError::UnknownSubscriptionPlan { plan_id: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(set: Option<&str>, order: Option<&str>) -> ProductMetadata {
        ProductMetadata {
            product_set: set.map(String::from),
            product_set_order: order.map(String::from),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_missing_metadata_is_unknown_plan() {
        let known = metadata(Some("set_a"), Some("1"));

        let err = is_plan_upgrade(None, Some(&known)).unwrap_err();
        assert!(matches!(
            err,
            SubgateError::UnknownSubscriptionPlan { plan_id: None }
        ));

        let err = is_plan_upgrade(Some(&known), None).unwrap_err();
        assert!(matches!(
            err,
            SubgateError::UnknownSubscriptionPlan { plan_id: None }
        ));
    }

    #[test]
    fn test_different_product_sets_never_upgrade() {
        let current = metadata(Some("set_a"), Some("1"));
        let target = metadata(Some("set_b"), Some("2"));
        assert!(!is_plan_upgrade(Some(&current), Some(&target)).unwrap());
    }

    #[test]
    fn test_empty_product_set_never_upgrades() {
        let current = metadata(None, Some("1"));
        let target = metadata(None, Some("2"));
        assert!(!is_plan_upgrade(Some(&current), Some(&target)).unwrap());

        let current = metadata(Some(""), Some("1"));
        let target = metadata(Some(""), Some("2"));
        assert!(!is_plan_upgrade(Some(&current), Some(&target)).unwrap());
    }

    #[test]
    fn test_unparseable_order_is_unknown_plan() {
        let current = metadata(Some("set_a"), Some("one"));
        let target = metadata(Some("set_a"), Some("2"));
        assert!(is_plan_upgrade(Some(&current), Some(&target)).is_err());

        let current = metadata(Some("set_a"), Some("1"));
        let target = metadata(Some("set_a"), None);
        assert!(is_plan_upgrade(Some(&current), Some(&target)).is_err());
    }

    #[test]
    fn test_strictly_higher_order_is_upgrade() {
        let lower = metadata(Some("set_a"), Some("1"));
        let higher = metadata(Some("set_a"), Some("2"));

        assert!(is_plan_upgrade(Some(&lower), Some(&higher)).unwrap());
        assert!(!is_plan_upgrade(Some(&higher), Some(&lower)).unwrap());
    }

    #[test]
    fn test_equal_order_is_not_an_upgrade() {
        let a = metadata(Some("set_a"), Some("3"));
        let b = metadata(Some("set_a"), Some("3"));
        assert!(!is_plan_upgrade(Some(&a), Some(&b)).unwrap());
    }

    #[test]
    fn test_order_with_surrounding_whitespace_parses() {
        let lower = metadata(Some("set_a"), Some(" 1 "));
        let higher = metadata(Some("set_a"), Some("10"));
        assert!(is_plan_upgrade(Some(&lower), Some(&higher)).unwrap());
    }
}
