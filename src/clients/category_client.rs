//! # Category Client

use crate::category_actor::CategoryError;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CategoryError::NotFound(id),
            other => other
                .entity_error::<CategoryError>()
                .cloned()
                .unwrap_or_else(|| CategoryError::ActorCommunicationError(other.to_string())),
        }
    }
}

impl CategoryClient {
    #[instrument(skip(self))]
    pub async fn create_category(&self, name: String) -> Result<CategoryId, CategoryError> {
        debug!("Sending request");
        self.inner
            .create(CategoryCreate { name })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn rename_category(
        &self,
        id: CategoryId,
        name: String,
    ) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner
            .update(id, CategoryUpdate { name })
            .await
            .map_err(Self::map_error)
    }

    /// Every category, sorted by name.
    #[instrument(skip(self))]
    pub async fn list_by_name(&self) -> Result<Vec<Category>, CategoryError> {
        let mut categories = self.list_all().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn test_list_by_name_sorts_alphabetically() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_list().return_ok(vec![
            Category { id: CategoryId(1), name: "Noodles".into() },
            Category { id: CategoryId(2), name: "Drinks".into() },
            Category { id: CategoryId(3), name: "Salads".into() },
        ]);
        let categories = CategoryClient::new(mock.client());

        let names: Vec<_> = categories
            .list_by_name()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Drinks", "Noodles", "Salads"]);
        mock.verify();
    }
}
