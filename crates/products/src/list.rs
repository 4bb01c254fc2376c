//! Typed, ordered associations between a product and referenced records.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity, SiteId, ValueObject};

use crate::price::PriceId;
use crate::product::ProductId;
use crate::types::TypeId;

catalog_core::uuid_id!(
    /// List association identifier.
    ListId,
    "ListId"
);

const ACCEPTED_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a submitted date/time; blank input means "no date".
///
/// Accepts both the space and the `T` separator, with or without seconds.
pub fn parse_datetime(input: &str) -> DomainResult<Option<NaiveDateTime>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    ACCEPTED_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(Some)
        .ok_or_else(|| DomainError::validation(format!("invalid date/time '{input}'")))
}

/// Free-form key/value settings attached to an association.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListConfig(BTreeMap<String, String>);

impl ListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from submitted key/value pairs.
    ///
    /// Keys and values are trimmed; pairs with a blank key or a missing value
    /// are dropped. Later duplicates win.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref().trim();
                let value = value?;
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect();
        Self(entries)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for ListConfig {}

/// Association from a product to a price record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    id: Option<ListId>,
    site_id: Option<SiteId>,
    parent_id: ProductId,
    domain: String,
    ref_id: Option<PriceId>,
    type_id: Option<TypeId>,
    position: u32,
    status: i32,
    date_start: Option<NaiveDateTime>,
    date_end: Option<NaiveDateTime>,
    config: ListConfig,
}

impl ListItem {
    /// Create an unsaved, enabled association below `parent_id`.
    pub fn new(parent_id: ProductId, domain: impl Into<String>) -> Self {
        Self {
            id: None,
            site_id: None,
            parent_id,
            domain: domain.into(),
            ref_id: None,
            type_id: None,
            position: 0,
            status: 1,
            date_start: None,
            date_end: None,
            config: ListConfig::new(),
        }
    }

    /// Stamp the store-assigned identity on a freshly inserted association.
    pub fn with_identity(mut self, id: ListId, site_id: SiteId) -> Self {
        self.id = Some(id);
        self.site_id = Some(site_id);
        self
    }

    pub fn site_id(&self) -> Option<SiteId> {
        self.site_id
    }

    pub fn parent_id(&self) -> ProductId {
        self.parent_id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn ref_id(&self) -> Option<PriceId> {
        self.ref_id
    }

    pub fn set_ref_id(&mut self, ref_id: PriceId) {
        self.ref_id = Some(ref_id);
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    pub fn set_type_id(&mut self, type_id: Option<TypeId>) {
        self.type_id = type_id;
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    pub fn date_start(&self) -> Option<NaiveDateTime> {
        self.date_start
    }

    pub fn date_end(&self) -> Option<NaiveDateTime> {
        self.date_end
    }

    /// Set the validity window. Rejects windows that end before they start.
    pub fn set_dates(
        &mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> DomainResult<()> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(DomainError::validation(
                    "end date must not be before start date",
                ));
            }
        }
        self.date_start = start;
        self.date_end = end;
        Ok(())
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ListConfig) {
        self.config = config;
    }
}

impl Entity for ListItem {
    type Id = ListId;

    fn id(&self) -> Option<ListId> {
        self.id
    }
}
