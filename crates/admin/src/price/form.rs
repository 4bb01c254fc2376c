//! Submitted price form data and its decoding into typed price lines.
//!
//! The form is column-oriented: every field name maps to an array indexed by
//! line number (`"price.value": ["10.00", "8.00"]`), and the custom config of
//! line `i` lives in `config[i].key` / `config[i].val`. The number of lines is
//! the length of the `product.lists.id` column.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult};
use catalog_products::{Amount, ListConfig, ListId, TypeId, parse_datetime};

/// Form field names.
pub mod field {
    pub const LIST_ID: &str = "product.lists.id";
    pub const LIST_SITE_ID: &str = "product.lists.siteid";
    pub const LIST_PARENT_ID: &str = "product.lists.parentid";
    pub const LIST_DOMAIN: &str = "product.lists.domain";
    pub const LIST_REF_ID: &str = "product.lists.refid";
    pub const LIST_TYPE_ID: &str = "product.lists.typeid";
    pub const LIST_POSITION: &str = "product.lists.position";
    pub const LIST_STATUS: &str = "product.lists.status";
    pub const LIST_DATE_START: &str = "product.lists.datestart";
    pub const LIST_DATE_END: &str = "product.lists.dateend";

    pub const PRICE_ID: &str = "price.id";
    pub const PRICE_SITE_ID: &str = "price.siteid";
    pub const PRICE_DOMAIN: &str = "price.domain";
    pub const PRICE_STATUS: &str = "price.status";
    pub const PRICE_TYPE_ID: &str = "price.typeid";
    pub const PRICE_CURRENCY_ID: &str = "price.currencyid";
    pub const PRICE_QUANTITY: &str = "price.quantity";
    pub const PRICE_VALUE: &str = "price.value";
    pub const PRICE_COSTS: &str = "price.costs";
    pub const PRICE_REBATE: &str = "price.rebate";
    pub const PRICE_TAX_RATE: &str = "price.taxrate";
    pub const PRICE_LABEL: &str = "price.label";
}

/// Parallel key/value arrays of one line's custom config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRows {
    #[serde(default)]
    pub key: Vec<Option<String>>,
    #[serde(default)]
    pub val: Vec<Option<String>>,
}

/// Column-oriented price form, as submitted and as rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormData {
    #[serde(default)]
    pub config: Vec<ConfigRows>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<Option<String>>>,
}

impl PriceFormData {
    /// Number of submitted lines.
    pub fn line_count(&self) -> usize {
        self.fields.get(field::LIST_ID).map_or(0, Vec::len)
    }

    /// Value of `name` for line `idx`; `None` if absent or null.
    pub fn value(&self, name: &str, idx: usize) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|column| column.get(idx))
            .and_then(|v| v.as_deref())
    }

    /// Set `name` for line `idx`, padding the column with nulls as needed.
    pub fn set(&mut self, name: &str, idx: usize, value: Option<String>) {
        let column = self.fields.entry(name.to_string()).or_default();
        if column.len() <= idx {
            column.resize(idx + 1, None);
        }
        column[idx] = value;
    }

    /// Config rows of line `idx`, padding with empty rows as needed.
    pub fn config_mut(&mut self, idx: usize) -> &mut ConfigRows {
        if self.config.len() <= idx {
            self.config.resize_with(idx + 1, ConfigRows::default);
        }
        &mut self.config[idx]
    }
}

/// One decoded price line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    /// Association id; `None` for lines that have not been saved yet.
    pub list_id: Option<ListId>,
    pub list_status: i32,
    pub status: i32,
    pub type_id: Option<TypeId>,
    pub currency_id: String,
    pub quantity: u32,
    pub value: Amount,
    pub costs: Amount,
    pub rebate: Amount,
    pub tax_rate: Amount,
    pub list_type_id: Option<TypeId>,
    pub date_start: Option<NaiveDateTime>,
    pub date_end: Option<NaiveDateTime>,
    pub config: ListConfig,
}

/// Decode every submitted line.
///
/// Missing values fall back to defaults (status 1, quantity 1, amounts
/// `0.00`); present but malformed values are validation errors. An
/// association id may appear on one line only.
pub fn decode(form: &PriceFormData) -> DomainResult<Vec<PriceLine>> {
    let lines = (0..form.line_count())
        .map(|idx| decode_line(form, idx))
        .collect::<DomainResult<Vec<_>>>()?;

    let mut seen = HashSet::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if let Some(id) = line.list_id {
            if !seen.insert(id) {
                return Err(DomainError::validation(format!(
                    "line {idx}: price association {id} is submitted more than once"
                )));
            }
        }
    }

    Ok(lines)
}

fn decode_line(form: &PriceFormData, idx: usize) -> DomainResult<PriceLine> {
    let text = |name: &str| form.value(name, idx).map(str::trim).filter(|v| !v.is_empty());

    // Unknown or unparsable association ids mark the line as new.
    let list_id = text(field::LIST_ID).and_then(|v| v.parse::<ListId>().ok());

    let status = |name: &str| -> DomainResult<i32> {
        text(name).map_or(Ok(1), |v| {
            v.parse::<i32>()
                .map_err(|_| DomainError::validation(format!("line {idx}: invalid status '{v}'")))
        })
    };

    let quantity = match text(field::PRICE_QUANTITY) {
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| DomainError::validation(format!("line {idx}: invalid quantity '{v}'")))?,
        None => 1,
    };

    let amount = |name: &str| -> DomainResult<Amount> {
        text(name).map_or(Ok(Amount::zero()), Amount::parse)
    };

    let type_id = |name: &str| -> DomainResult<Option<TypeId>> {
        text(name).map(str::parse::<TypeId>).transpose()
    };

    let date = |name: &str| -> DomainResult<Option<NaiveDateTime>> {
        text(name).map_or(Ok(None), parse_datetime)
    };

    let config = form
        .config
        .get(idx)
        .map(|rows| {
            ListConfig::from_pairs(rows.key.iter().enumerate().map(|(num, key)| {
                (
                    key.as_deref().unwrap_or_default(),
                    rows.val.get(num).cloned().flatten(),
                )
            }))
        })
        .unwrap_or_default();

    Ok(PriceLine {
        list_id,
        list_status: status(field::LIST_STATUS)?,
        status: status(field::PRICE_STATUS)?,
        type_id: type_id(field::PRICE_TYPE_ID)?,
        currency_id: text(field::PRICE_CURRENCY_ID).unwrap_or_default().to_string(),
        quantity,
        value: amount(field::PRICE_VALUE)?,
        costs: amount(field::PRICE_COSTS)?,
        rebate: amount(field::PRICE_REBATE)?,
        tax_rate: amount(field::PRICE_TAX_RATE)?,
        list_type_id: type_id(field::LIST_TYPE_ID)?,
        date_start: date(field::LIST_DATE_START)?,
        date_end: date(field::LIST_DATE_END)?,
        config,
    })
}
