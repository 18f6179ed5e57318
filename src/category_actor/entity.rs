//! ActorEntity implementation for [`Category`].

use super::error::CategoryError;
use crate::framework::ActorEntity;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use async_trait::async_trait;

/// Categories have no custom actions.
#[derive(Debug, Clone)]
pub enum CategoryAction {}

fn validate_name(name: &str) -> Result<(), CategoryError> {
    if name.trim().is_empty() {
        return Err(CategoryError::ValidationError("name must not be blank".into()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Action = CategoryAction;
    type ActionResult = ();
    type Context = ();
    type Error = CategoryError;

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        Ok(Category {
            id,
            name: params.name,
        })
    }

    async fn on_update(&mut self, update: CategoryUpdate, _ctx: &()) -> Result<(), Self::Error> {
        validate_name(&update.name)?;
        self.name = update.name;
        Ok(())
    }

    async fn handle_action(&mut self, action: CategoryAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
