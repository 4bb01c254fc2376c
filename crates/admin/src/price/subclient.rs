//! Nested clients run after the price client's own work.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context::AdminContext;
use crate::error::{AdminError, AdminResult};
use crate::price::view::PriceView;

/// Client for a part of the price editor (e.g. price texts).
///
/// Every operation defaults to doing nothing. Rendering operations may return
/// a body fragment that is appended to [`PriceView::price_body`].
pub trait SubClient: Send + Sync {
    fn name(&self) -> &str;

    fn get(&self, _ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<Option<String>> {
        Ok(None)
    }

    fn copy(&self, _ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<Option<String>> {
        Ok(None)
    }

    fn create(&self, _ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<Option<String>> {
        Ok(None)
    }

    /// Runs inside the price save transaction.
    fn save(&self, _ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<Option<String>> {
        Ok(None)
    }

    fn delete(&self, _ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<()> {
        Ok(())
    }
}

/// Named sub-clients available to the price client.
#[derive(Clone, Default)]
pub struct SubClientRegistry {
    clients: HashMap<String, Arc<dyn SubClient>>,
}

impl SubClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `client` under its name, replacing a previous one.
    pub fn register(&mut self, client: Arc<dyn SubClient>) -> &mut Self {
        self.clients.insert(client.name().to_string(), client);
        self
    }

    /// Resolve the configured names, keeping their order.
    pub fn resolve(&self, names: &[String]) -> AdminResult<Vec<Arc<dyn SubClient>>> {
        names
            .iter()
            .map(|name| {
                self.clients
                    .get(name)
                    .cloned()
                    .ok_or_else(|| AdminError::UnknownSubClient(name.clone()))
            })
            .collect()
    }
}

impl fmt::Debug for SubClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.clients.keys().collect();
        names.sort();
        f.debug_struct("SubClientRegistry").field("clients", &names).finish()
    }
}
