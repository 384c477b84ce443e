//! Registered accounts and author resolution.

use std::sync::Arc;

use gloomy_core::{
  author::{Author, Identity, NonUser},
  entity::EntityKind,
  lifecycle::Status,
  store::Store,
  user::{NewUser, User},
};
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result, password::hash_password, require_id, resolve};

/// Sign-up request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequest {
  pub email: Option<String>,
  pub name:  Option<String>,
}

pub struct UserService<S> {
  store: Arc<S>,
}

impl<S> Clone for UserService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: Store> UserService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn create_user(&self, request: UserRequest) -> Result<User> {
    let email = non_blank(request.email)
      .ok_or_else(|| Error::invalid("sign-up request requires an email"))?;
    let name = non_blank(request.name)
      .ok_or_else(|| Error::invalid("sign-up request requires a name"))?;

    if self
      .store
      .find_user_by_email(&email)
      .await
      .map_err(Error::store)?
      .is_some()
    {
      return Err(Error::invalid(format!("email {email} is already registered")));
    }

    let user = self
      .store
      .insert_user(NewUser { email, name })
      .await
      .map_err(Error::store)?;
    debug!(user_id = user.id, "user created");
    Ok(user)
  }

  /// Resolve an account that is still joined. Departed users are not found.
  pub async fn find_user(&self, id: i64) -> Result<User> {
    let id = require_id(Some(id), "user")?;
    let user: User = resolve(&*self.store, id).await?;
    if user.join_status != Status::Active {
      return Err(Error::NotFound { entity: EntityKind::User, id });
    }
    Ok(user)
  }

  /// Turn a caller's claimed identity into a persisted [`Author`]: members
  /// must resolve, guests get their password hashed.
  pub async fn author_for(&self, identity: Identity) -> Result<Author> {
    match identity {
      Identity::Member(user_id) => {
        let user = self.find_user(user_id).await?;
        Ok(Author::Registered { user_id: user.id })
      }
      Identity::Guest(password) => {
        if password.is_empty() {
          return Err(Error::invalid("anonymous password must not be empty"));
        }
        let hash = hash_password(password).await?;
        Ok(Author::Anonymous(NonUser::anonymous(hash)))
      }
    }
  }
}

fn non_blank(s: Option<String>) -> Option<String> {
  s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}
