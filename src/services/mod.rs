//! Business logic services

pub mod catalog;
pub mod orders;

use crate::{config::WebsiteConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub orders: orders::OrdersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, website_config: WebsiteConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            orders: orders::OrdersService::new(repository, website_config),
        }
    }
}
