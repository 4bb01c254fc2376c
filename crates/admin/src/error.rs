use thiserror::Error;

use catalog_core::DomainError;
use catalog_infra::StoreError;

use crate::price::view::PriceView;

pub type AdminResult<T> = Result<T, AdminError>;

/// Failure of an admin client operation.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The site is missing data every operation needs (e.g. currencies).
    #[error("{0}")]
    Configuration(String),

    #[error("unknown price sub-client: {0}")]
    UnknownSubClient(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Saving failed and was rolled back; the view carries the submitted data
    /// and the recorded error messages.
    #[error("saving product prices failed")]
    SaveFailed(Box<PriceView>),
}

impl From<DomainError> for AdminError {
    fn from(e: DomainError) -> Self {
        AdminError::Store(StoreError::Domain(e))
    }
}
