//! ActorEntity implementation for [`User`].
//!
//! Emails are stored lowercased and are unique across all users. Uniqueness is checked
//! by the actor inside the create or update message itself.

use super::error::UserError;
use crate::framework::ActorEntity;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub enum UserAction {}

fn validate(full_name: &str, email: &str) -> Result<(), UserError> {
    if full_name.trim().is_empty() {
        return Err(UserError::ValidationError("full name must not be blank".into()));
    }
    if !email.contains('@') {
        return Err(UserError::ValidationError(format!("invalid email: {email}")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn check_conflict(&self, existing: &User) -> Result<(), Self::Error> {
        if existing.email == self.email {
            return Err(UserError::AlreadyExists(self.email.clone()));
        }
        Ok(())
    }

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate(&params.full_name, &params.email)?;
        Ok(User {
            id,
            full_name: params.full_name,
            email: params.email.to_lowercase(),
            role: params.role,
        })
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = update.email {
            self.email = email.to_lowercase();
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        validate(&self.full_name, &self.email)
    }

    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
