//! Reconciles submitted price lines with the persisted price associations.

use catalog_core::{DomainError, Entity};
use catalog_infra::{ProductPrices, StoreError, StoreResult};
use catalog_products::{ListId, ListItem, PriceId, PriceItem, PRICE_DOMAIN};

use crate::context::AdminContext;
use crate::price::form::PriceLine;

/// What a reconciliation changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Bring the product's price associations in line with `lines`.
///
/// Line `i` becomes the association at position `i`. Lines whose association
/// id is not among the product's existing associations create a new price and
/// association; the others update the existing pair in place. Existing
/// associations missing from `lines` are deleted together with their prices.
///
/// Writes are not transactional here; callers wrap this in a unit of work.
pub fn reconcile(
    ctx: &AdminContext,
    item: &ProductPrices,
    lines: &[PriceLine],
) -> StoreResult<ReconcileOutcome> {
    let site_id = ctx.site_id;
    let product_id = item
        .product
        .id()
        .ok_or_else(|| DomainError::invariant("product must be saved before its prices"))?;

    let mut outcome = ReconcileOutcome::default();
    let mut kept: Vec<ListId> = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let existing = line.list_id.and_then(|id| item.find(id));

        let (mut list, price) = match existing {
            Some(found) => {
                outcome.updated += 1;
                kept.extend(found.list.id());
                let price = found
                    .price
                    .clone()
                    .unwrap_or_else(|| ctx.stores.prices.create_price());
                (found.list.clone(), price)
            }
            None => {
                outcome.created += 1;
                (
                    ListItem::new(product_id, PRICE_DOMAIN),
                    ctx.stores.prices.create_price(),
                )
            }
        };

        let price = apply_line(price, line)?;
        let price = ctx.stores.prices.save_price(site_id, price)?;
        let price_id = price
            .id()
            .ok_or_else(|| StoreError::backend("price store returned an unsaved price"))?;

        list.set_status(line.list_status);
        list.set_config(line.config.clone());
        list.set_position(u32::try_from(idx).map_err(|_| {
            DomainError::validation(format!("too many price lines ({})", lines.len()))
        })?);
        list.set_ref_id(price_id);
        list.set_type_id(line.list_type_id);
        list.set_dates(line.date_start, line.date_end)?;

        ctx.stores.lists.save_list_item(site_id, list)?;
    }

    let (removed_lists, removed_prices): (Vec<ListId>, Vec<PriceId>) = item
        .refs
        .iter()
        .filter_map(|r| r.list.id().map(|id| (id, r.list.ref_id())))
        .filter(|(id, _)| !kept.contains(id))
        .fold((Vec::new(), Vec::new()), |(mut lists, mut prices), (id, ref_id)| {
            lists.push(id);
            prices.extend(ref_id);
            (lists, prices)
        });

    if !removed_lists.is_empty() {
        ctx.stores.lists.delete_list_items(site_id, &removed_lists)?;
        ctx.stores.prices.delete_prices(site_id, &removed_prices)?;
    }
    outcome.removed = removed_lists.len();

    tracing::debug!(
        product_id = %product_id,
        created = outcome.created,
        updated = outcome.updated,
        removed = outcome.removed,
        "reconciled product prices"
    );

    Ok(outcome)
}

fn apply_line(mut price: PriceItem, line: &PriceLine) -> StoreResult<PriceItem> {
    price.set_status(line.status);
    price.set_type_id(line.type_id);
    price.set_currency_id(&line.currency_id)?;
    price.set_quantity(line.quantity)?;
    price.set_value(line.value);
    price.set_costs(line.costs);
    price.set_rebate(line.rebate);
    price.set_tax_rate(line.tax_rate);
    price.set_label(price.summary_label());
    Ok(price)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::price::form::{self, PriceFormData};
    use crate::price::projector::{self, ProjectionMode};
    use crate::testing::Fixture;

    fn lines(value: serde_json::Value) -> Vec<PriceLine> {
        let data: PriceFormData = serde_json::from_value(value).unwrap();
        form::decode(&data).unwrap()
    }

    fn two_new_lines() -> Vec<PriceLine> {
        lines(json!({
            "product.lists.id": ["", ""],
            "price.value": ["10.00", "8.00"],
            "price.currencyid": ["EUR", "USD"],
            "price.quantity": ["2", "1"],
        }))
    }

    #[test]
    fn new_lines_create_prices_in_submission_order() {
        let fx = Fixture::new();
        let product = fx.product();

        let outcome = reconcile(&fx.ctx, &fx.load(product), &two_new_lines()).unwrap();
        assert_eq!(outcome, ReconcileOutcome { created: 2, updated: 0, removed: 0 });

        let loaded = fx.load(product);
        let labels: Vec<_> = loaded
            .refs
            .iter()
            .map(|r| r.price.as_ref().unwrap().label().to_string())
            .collect();
        assert_eq!(labels, vec!["2 ~ 10.00 EUR", "1 ~ 8.00 USD"]);

        let positions: Vec<_> = loaded.refs.iter().map(|r| r.list.position()).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn empty_submission_removes_all_prices() {
        let fx = Fixture::new();
        let product = fx.product();
        reconcile(&fx.ctx, &fx.load(product), &two_new_lines()).unwrap();
        let before = fx.load(product);
        let price_ids = before.price_ids();

        let outcome = reconcile(&fx.ctx, &before, &[]).unwrap();
        assert_eq!(outcome.removed, 2);
        assert!(fx.load(product).refs.is_empty());
        assert!(fx.ctx.stores.prices.get_prices(fx.ctx.site_id, &price_ids).unwrap().is_empty());
    }

    #[test]
    fn resubmitting_the_projection_keeps_ids() {
        let fx = Fixture::new();
        let product = fx.product();
        reconcile(&fx.ctx, &fx.load(product), &two_new_lines()).unwrap();
        let first = fx.load(product);

        let data = projector::project(&first, ProjectionMode::Edit);
        let outcome = reconcile(&fx.ctx, &first, &form::decode(&data).unwrap()).unwrap();

        assert_eq!(outcome, ReconcileOutcome { created: 0, updated: 2, removed: 0 });
        assert_eq!(fx.load(product), first);
    }

    #[test]
    fn omitted_lines_are_deleted_and_the_rest_reordered() {
        let fx = Fixture::new();
        let product = fx.product();
        reconcile(&fx.ctx, &fx.load(product), &two_new_lines()).unwrap();
        let first = fx.load(product);
        let usd_list = first.refs[1].list.id().unwrap();
        let eur_price = first.refs[0].list.ref_id().unwrap();

        let outcome = reconcile(
            &fx.ctx,
            &first,
            &lines(json!({
                "product.lists.id": [usd_list.to_string()],
                "price.value": ["7.50"],
                "price.currencyid": ["USD"],
            })),
        )
        .unwrap();
        assert_eq!(outcome, ReconcileOutcome { created: 0, updated: 1, removed: 1 });

        let after = fx.load(product);
        assert_eq!(after.refs.len(), 1);
        assert_eq!(after.refs[0].list.id(), Some(usd_list));
        assert_eq!(after.refs[0].list.position(), 0);
        assert_eq!(after.refs[0].price.as_ref().unwrap().label(), "1 ~ 7.50 USD");
        assert!(fx.ctx.stores.prices.get_prices(fx.ctx.site_id, &[eur_price]).unwrap().is_empty());
    }

    #[test]
    fn blank_config_keys_are_not_persisted() {
        let fx = Fixture::new();
        let product = fx.product();

        reconcile(
            &fx.ctx,
            &fx.load(product),
            &lines(json!({
                "product.lists.id": [""],
                "price.currencyid": ["EUR"],
                "config": [{ "key": ["  ", "tier"], "val": ["x", " gold "] }],
            })),
        )
        .unwrap();

        let config = fx.load(product).refs[0].list.config().clone();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("tier"), Some("gold"));
    }

    #[test]
    fn association_status_is_stored_apart_from_the_price_status() {
        let fx = Fixture::new();
        let product = fx.product();

        reconcile(
            &fx.ctx,
            &fx.load(product),
            &lines(json!({
                "product.lists.id": [""],
                "product.lists.status": ["0"],
                "price.status": ["1"],
                "price.currencyid": ["EUR"],
            })),
        )
        .unwrap();

        let loaded = fx.load(product);
        assert_eq!(loaded.refs[0].list.status(), 0);
        assert_eq!(loaded.refs[0].price.as_ref().unwrap().status(), 1);
    }

    #[test]
    fn dangling_reference_gets_a_fresh_price() {
        let fx = Fixture::new();
        let product = fx.product();
        reconcile(&fx.ctx, &fx.load(product), &two_new_lines()).unwrap();
        let first = fx.load(product);
        let old_price = first.refs[0].list.ref_id().unwrap();
        fx.ctx.stores.prices.delete_prices(fx.ctx.site_id, &[old_price]).unwrap();

        let stale = fx.load(product);
        let data = projector::project(&first, ProjectionMode::Edit);
        reconcile(&fx.ctx, &stale, &form::decode(&data).unwrap()).unwrap();

        let after = fx.load(product);
        assert_eq!(after.refs.len(), 2);
        assert_ne!(after.refs[0].list.ref_id(), Some(old_price));
        assert!(after.refs.iter().all(|r| r.price.is_some()));
    }

    #[test]
    fn invalid_currency_fails_before_the_price_is_written() {
        let fx = Fixture::new();
        let product = fx.product();

        let err = reconcile(
            &fx.ctx,
            &fx.load(product),
            &lines(json!({ "product.lists.id": [""], "price.currencyid": ["euro"] })),
        )
        .unwrap_err();

        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        assert!(fx.load(product).refs.is_empty());
    }
}
