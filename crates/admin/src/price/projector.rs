//! Flattens persisted price associations into the price form shape.

use chrono::NaiveDateTime;

use catalog_core::{Entity, SiteId};
use catalog_infra::ProductPrices;

use crate::price::form::{PriceFormData, field};

const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// How associations are projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Keep association ids so a resubmission updates the same records.
    Edit,
    /// Blank association ids and stamp `site_id`, so saving creates copies.
    Copy { site_id: SiteId },
}

/// Project every association that still references a price.
///
/// Associations whose price is gone are skipped; the remaining lines are
/// numbered without gaps.
pub fn project(item: &ProductPrices, mode: ProjectionMode) -> PriceFormData {
    let mut data = PriceFormData::default();
    let present = item
        .refs
        .iter()
        .filter_map(|r| r.price.as_ref().map(|price| (&r.list, price)));

    for (idx, (list, price)) in present.enumerate() {
        let (list_id, list_site) = match mode {
            ProjectionMode::Edit => (
                list.id().map(|id| id.to_string()),
                list.site_id().map(|id| id.to_string()),
            ),
            ProjectionMode::Copy { site_id } => (Some(String::new()), Some(site_id.to_string())),
        };

        data.set(field::LIST_ID, idx, list_id);
        data.set(field::LIST_SITE_ID, idx, list_site);
        data.set(field::LIST_PARENT_ID, idx, Some(list.parent_id().to_string()));
        data.set(field::LIST_DOMAIN, idx, Some(list.domain().to_string()));
        data.set(field::LIST_REF_ID, idx, list.ref_id().map(|id| id.to_string()));
        data.set(field::LIST_TYPE_ID, idx, list.type_id().map(|id| id.to_string()));
        data.set(field::LIST_POSITION, idx, Some(list.position().to_string()));
        data.set(field::LIST_STATUS, idx, Some(list.status().to_string()));
        data.set(field::LIST_DATE_START, idx, list.date_start().map(form_datetime));
        data.set(field::LIST_DATE_END, idx, list.date_end().map(form_datetime));

        data.set(field::PRICE_ID, idx, price.id().map(|id| id.to_string()));
        data.set(field::PRICE_SITE_ID, idx, price.site_id().map(|id| id.to_string()));
        data.set(field::PRICE_DOMAIN, idx, Some(price.domain().to_string()));
        data.set(field::PRICE_STATUS, idx, Some(price.status().to_string()));
        data.set(field::PRICE_TYPE_ID, idx, price.type_id().map(|id| id.to_string()));
        data.set(field::PRICE_CURRENCY_ID, idx, Some(price.currency_id().to_string()));
        data.set(field::PRICE_QUANTITY, idx, Some(price.quantity().to_string()));
        data.set(field::PRICE_VALUE, idx, Some(price.value().to_string()));
        data.set(field::PRICE_COSTS, idx, Some(price.costs().to_string()));
        data.set(field::PRICE_REBATE, idx, Some(price.rebate().to_string()));
        data.set(field::PRICE_TAX_RATE, idx, Some(price.tax_rate().to_string()));
        data.set(field::PRICE_LABEL, idx, Some(price.label().to_string()));

        let rows = data.config_mut(idx);
        for (key, val) in list.config().iter() {
            rows.key.push(Some(key.to_string()));
            rows.val.push(Some(val.to_string()));
        }
    }

    data
}

fn form_datetime(value: NaiveDateTime) -> String {
    value.format(FORM_DATETIME_FORMAT).to_string()
}
