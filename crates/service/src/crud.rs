use async_trait::async_trait;

use crate::errors::ServiceError;

/// Generic persistence/business port for one entity kind keyed by `Id`.
///
/// Implemented once per entity; the HTTP layer only ever talks to this trait.
/// `get_by_id` reports absence as `Ok(None)`, `update` on a missing entity is
/// `ServiceError::NotFound`, and `delete` succeeds whether or not the entity existed.
#[async_trait]
pub trait CrudService<E, Id>: Send + Sync
where
    E: Send + 'static,
    Id: Send + 'static,
{
    async fn get_all(&self) -> Result<Vec<E>, ServiceError>;
    async fn get_by_id(&self, id: Id) -> Result<Option<E>, ServiceError>;
    async fn create(&self, entity: E) -> Result<E, ServiceError>;
    async fn update(&self, entity: E) -> Result<E, ServiceError>;
    async fn delete(&self, id: Id) -> Result<(), ServiceError>;
}
