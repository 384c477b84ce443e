//! The lookup-or-fail contract behind every foreign-key resolution.

use gloomy_core::{entity::Entity, store::Lookup};

use crate::{Error, Result};

/// Fetch `T` by id, turning a missing row into [`Error::NotFound`].
pub async fn resolve<T, S>(store: &S, id: i64) -> Result<T>
where
  T: Entity,
  S: Lookup<T>,
{
  Lookup::<T>::lookup(store, id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound { entity: T::KIND, id })
}
