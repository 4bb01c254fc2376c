//! Admin client for the prices of a product.
//!
//! The client renders the price editor data (`get`, `copy`, `create`) and
//! writes submitted price lines back (`save`, `delete`). Writes span the list
//! association connection and the text connection and are all-or-nothing.

pub mod form;
pub mod projector;
pub mod reconcile;
pub mod subclient;
pub mod view;

use std::sync::Arc;

use catalog_infra::{StoreError, Transactional, UnitOfWork};
use catalog_products::{PRICE_DOMAIN, PRODUCT_DOMAIN, ProductId, sort_list_types};

use crate::context::AdminContext;
use crate::error::{AdminError, AdminResult};

pub use form::{ConfigRows, PriceFormData, PriceLine};
pub use projector::ProjectionMode;
pub use reconcile::ReconcileOutcome;
pub use subclient::{SubClient, SubClientRegistry};
pub use view::{PRICE_ERROR_KEY, PriceView};

/// Translation domain of admin messages.
pub const ADMIN_DOMAIN: &str = "admin";

/// Translation domain of store and validation messages.
pub const CATALOG_DOMAIN: &str = "catalog";

pub const NO_CURRENCIES: &str = "No currencies available. Please enable at least one currency";

/// Product price client bound to one site.
#[derive(Clone)]
pub struct PriceClient {
    ctx: AdminContext,
    subclients: Vec<Arc<dyn SubClient>>,
}

impl PriceClient {
    pub fn new(ctx: AdminContext, subclients: Vec<Arc<dyn SubClient>>) -> Self {
        Self { ctx, subclients }
    }

    pub fn context(&self) -> &AdminContext {
        &self.ctx
    }

    /// Editor data for the stored prices of `product_id`.
    pub fn get(&self, product_id: ProductId) -> AdminResult<PriceView> {
        let mut view = self.prepare_view()?;
        let _gate = self.ctx.stores.gate.read();
        let item = self.ctx.load_prices(product_id)?;
        view.price_data = projector::project(&item, ProjectionMode::Edit);
        view.item = Some(item.product);

        self.render_subparts(&mut view, |client, ctx, view| client.get(ctx, view))?;
        Ok(view)
    }

    /// Editor data for copying the prices of `product_id` to a new product.
    pub fn copy(&self, product_id: ProductId) -> AdminResult<PriceView> {
        let mut view = self.prepare_view()?;
        let _gate = self.ctx.stores.gate.read();
        let item = self.ctx.load_prices(product_id)?;
        let mode = ProjectionMode::Copy {
            site_id: self.ctx.site_id,
        };
        view.price_data = projector::project(&item, mode);
        view.item = Some(item.product);

        self.render_subparts(&mut view, |client, ctx, view| client.copy(ctx, view))?;
        Ok(view)
    }

    /// Editor data for a new product, echoing submitted lines if any.
    pub fn create(&self, params: PriceFormData) -> AdminResult<PriceView> {
        let mut view = self.prepare_view()?;
        view.price_data = params;

        let site = self.ctx.site_id.to_string();
        for idx in 0..view.price_data.line_count() {
            view.price_data
                .set(form::field::LIST_SITE_ID, idx, Some(site.clone()));
        }

        self.render_subparts(&mut view, |client, ctx, view| client.create(ctx, view))?;
        Ok(view)
    }

    /// Store the submitted price lines of `product_id`.
    ///
    /// On success the view holds the stored state. On failure every write is
    /// rolled back and [`AdminError::SaveFailed`] carries the submitted data
    /// with the failure recorded under [`PRICE_ERROR_KEY`].
    ///
    /// Readers of the same stores wait until the save has committed or rolled
    /// back.
    pub fn save(&self, product_id: ProductId, params: PriceFormData) -> AdminResult<PriceView> {
        let mut view = self.prepare_view()?;
        view.price_data = params.clone();

        let _gate = self.ctx.stores.gate.write();

        if let Err(err) = self.save_in_unit(product_id, &mut view) {
            tracing::error!(
                site_id = %self.ctx.site_id,
                product_id = %product_id,
                error = %err,
                "saving product prices failed"
            );
            view.price_data = params;
            view.errors
                .insert(PRICE_ERROR_KEY.to_string(), self.error_message(&err));
            return Err(AdminError::SaveFailed(Box::new(view)));
        }

        Ok(view)
    }

    /// Remove all prices of `product_id` together with their associations.
    pub fn delete(&self, product_id: ProductId) -> AdminResult<()> {
        let site_id = self.ctx.site_id;
        let stores = &self.ctx.stores;
        let _gate = stores.gate.write();
        let item = self.ctx.load_prices(product_id)?;
        let mut view = PriceView {
            item: Some(item.product.clone()),
            ..PriceView::default()
        };

        let unit = UnitOfWork::begin(vec![
            &*stores.lists as &dyn Transactional,
            &*stores.texts as &dyn Transactional,
        ])?;

        for client in &self.subclients {
            client.delete(&self.ctx, &mut view)?;
        }
        stores.lists.delete_list_items(site_id, &item.list_ids())?;
        stores.prices.delete_prices(site_id, &item.price_ids())?;

        unit.commit()?;

        tracing::info!(
            site_id = %site_id,
            product_id = %product_id,
            removed = item.refs.len(),
            "deleted product prices"
        );
        Ok(())
    }

    /// Currencies and types every editor view needs.
    fn prepare_view(&self) -> AdminResult<PriceView> {
        let stores = &self.ctx.stores;

        let currencies = stores.currencies.search_currencies(true)?;
        if currencies.is_empty() {
            return Err(AdminError::Configuration(
                self.ctx.i18n.dt(ADMIN_DOMAIN, NO_CURRENCIES),
            ));
        }

        Ok(PriceView {
            price_currencies: currencies,
            price_types: stores.price_types.search_types(PRODUCT_DOMAIN)?,
            price_list_types: sort_list_types(stores.list_types.search_types(PRICE_DOMAIN)?),
            ..PriceView::default()
        })
    }

    fn save_in_unit(&self, product_id: ProductId, view: &mut PriceView) -> AdminResult<()> {
        let stores = &self.ctx.stores;
        let unit = UnitOfWork::begin(vec![
            &*stores.lists as &dyn Transactional,
            &*stores.texts as &dyn Transactional,
        ])?;

        let item = self.ctx.load_prices(product_id)?;
        let lines = form::decode(&view.price_data)?;
        let outcome = reconcile::reconcile(&self.ctx, &item, &lines)?;

        let saved = self.ctx.load_prices(product_id)?;
        view.price_data = projector::project(&saved, ProjectionMode::Edit);
        view.item = Some(saved.product);

        for client in &self.subclients {
            let body = client.save(&self.ctx, view)?;
            view.append_body(body);
        }

        unit.commit()?;

        tracing::info!(
            site_id = %self.ctx.site_id,
            product_id = %product_id,
            created = outcome.created,
            updated = outcome.updated,
            removed = outcome.removed,
            "saved product prices"
        );
        Ok(())
    }

    fn render_subparts<F>(&self, view: &mut PriceView, op: F) -> AdminResult<()>
    where
        F: Fn(&dyn SubClient, &AdminContext, &mut PriceView) -> AdminResult<Option<String>>,
    {
        for client in &self.subclients {
            let body = op(client.as_ref(), &self.ctx, view)?;
            view.append_body(body);
        }
        Ok(())
    }

    /// Message recorded in the view for a failed save.
    ///
    /// Domain failures are translated; backend failures carry their source
    /// location.
    fn error_message(&self, err: &AdminError) -> String {
        match err {
            AdminError::Store(StoreError::Domain(e)) => {
                self.ctx.i18n.dt(CATALOG_DOMAIN, &e.to_string())
            }
            AdminError::Store(StoreError::Backend { message, location }) => {
                format!("{message}, {}:{}", location.file(), location.line())
            }
            other => other.to_string(),
        }
    }
}
