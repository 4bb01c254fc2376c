//! Price records attached to products through list associations.

use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity, SiteId};

use crate::amount::Amount;
use crate::types::TypeId;

catalog_core::uuid_id!(
    /// Price record identifier.
    PriceId,
    "PriceId"
);

/// A priced variant: value, currency, quantity tier, costs, rebate and tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceItem {
    id: Option<PriceId>,
    site_id: Option<SiteId>,
    domain: String,
    status: i32,
    type_id: Option<TypeId>,
    currency_id: String,
    quantity: u32,
    value: Amount,
    costs: Amount,
    rebate: Amount,
    tax_rate: Amount,
    label: String,
}

impl PriceItem {
    /// Create an unsaved price for the given domain (`product` for catalog prices).
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            id: None,
            site_id: None,
            domain: domain.into(),
            status: 1,
            type_id: None,
            currency_id: String::new(),
            quantity: 1,
            value: Amount::zero(),
            costs: Amount::zero(),
            rebate: Amount::zero(),
            tax_rate: Amount::zero(),
            label: String::new(),
        }
    }

    /// Stamp the store-assigned identity on a freshly inserted price.
    pub fn with_identity(mut self, id: PriceId, site_id: SiteId) -> Self {
        self.id = Some(id);
        self.site_id = Some(site_id);
        self
    }

    pub fn site_id(&self) -> Option<SiteId> {
        self.site_id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    pub fn set_type_id(&mut self, type_id: Option<TypeId>) {
        self.type_id = type_id;
    }

    pub fn currency_id(&self) -> &str {
        &self.currency_id
    }

    /// Set the ISO 4217 currency code (three upper-case letters).
    pub fn set_currency_id(&mut self, currency_id: &str) -> DomainResult<()> {
        let code = currency_id.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::validation(format!(
                "invalid currency code '{code}'"
            )));
        }
        self.currency_id = code.to_string();
        Ok(())
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn set_value(&mut self, value: Amount) {
        self.value = value;
    }

    pub fn costs(&self) -> Amount {
        self.costs
    }

    pub fn set_costs(&mut self, costs: Amount) {
        self.costs = costs;
    }

    pub fn rebate(&self) -> Amount {
        self.rebate
    }

    pub fn set_rebate(&mut self, rebate: Amount) {
        self.rebate = rebate;
    }

    pub fn tax_rate(&self) -> Amount {
        self.tax_rate
    }

    pub fn set_tax_rate(&mut self, tax_rate: Amount) {
        self.tax_rate = tax_rate;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Summary label: `"{quantity} ~ {value} {currency}"`, e.g. `"2 ~ 10.00 EUR"`.
    pub fn summary_label(&self) -> String {
        format!("{} ~ {} {}", self.quantity, self.value, self.currency_id)
    }
}

impl Entity for PriceItem {
    type Id = PriceId;

    fn id(&self) -> Option<PriceId> {
        self.id
    }
}
