//! Product lookup for the order screen.

use crate::category_actor::CategoryError;
use crate::clients::{CategoryClient, ProductClient};
use crate::framework::ActorClient;
use crate::model::{Category, CategoryId, Product};
use crate::product_actor::ProductError;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Category(#[from] CategoryError),
}

/// Read-side view over products and their categories.
#[derive(Clone)]
pub struct Catalog {
    products: ProductClient,
    categories: CategoryClient,
}

impl Catalog {
    pub fn new(products: ProductClient, categories: CategoryClient) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Products whose name or category name contains `term`, ignoring case.
    ///
    /// A blank term returns every product. Results are in id order.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.list_all().await?;
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(products);
        }

        let categories: HashMap<CategoryId, Category> = self
            .categories
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let matches: Vec<Product> = products
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p
                        .category_id
                        .and_then(|id| categories.get(&id))
                        .is_some_and(|c| c.name.to_lowercase().contains(&term))
            })
            .collect();
        debug!(matched = matches.len(), "Search");
        Ok(matches)
    }

    /// Products of one category, in id order.
    #[instrument(skip(self))]
    pub async fn in_category(&self, category_id: CategoryId) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.list_all().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.category_id == Some(category_id))
            .collect())
    }
}
