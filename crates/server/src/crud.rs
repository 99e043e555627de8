use std::fmt::Display;
use std::sync::Arc;

use service::crud::CrudService;
use tracing::{debug, warn};

use crate::dtos::Dto;
use crate::errors::ApiError;
use crate::mapper::DtoMapper;

/// The five standard CRUD operations for any entity/DTO/id triple.
///
/// Business logic lives behind `CrudService`; this layer only validates
/// payloads, applies the path id, and maps between entity and DTO.
pub struct CrudController<E, D, Id>
where
    E: Send + 'static,
    Id: Send + 'static,
{
    service: Arc<dyn CrudService<E, Id>>,
    mapper: Arc<dyn DtoMapper<E, D>>,
}

impl<E, D, Id> CrudController<E, D, Id>
where
    E: Send + 'static,
    D: Dto<Id>,
    Id: Copy + PartialEq + Display + Send + Sync + 'static,
{
    pub fn new(service: Arc<dyn CrudService<E, Id>>, mapper: Arc<dyn DtoMapper<E, D>>) -> Self {
        Self { service, mapper }
    }

    /// All entities in service order.
    pub async fn get_all(&self) -> Result<Vec<D>, ApiError> {
        let all = self.service.get_all().await?;
        Ok(all.into_iter().map(|e| self.mapper.to_dto(e)).collect())
    }

    pub async fn get_by_id(&self, id: Id) -> Result<D, ApiError> {
        match self.service.get_by_id(id).await? {
            Some(e) => Ok(self.mapper.to_dto(e)),
            None => {
                debug!(%id, "entity not found");
                Err(ApiError::NotFound)
            }
        }
    }

    /// Any client-supplied id is dropped; the service assigns one.
    pub async fn create(&self, mut dto: D) -> Result<D, ApiError> {
        dto.set_id(None);
        dto.validate()?;
        let entity = self.mapper.to_entity(dto)?;
        let created = self.service.create(entity).await?;
        Ok(self.mapper.to_dto(created))
    }

    /// The path id wins over whatever id the payload carries.
    pub async fn update(&self, id: Id, mut dto: D) -> Result<D, ApiError> {
        if let Some(body_id) = dto.id() {
            if body_id != id {
                warn!(%id, %body_id, "payload id differs from path id; using path id");
            }
        }
        dto.set_id(Some(id));
        dto.validate()?;
        let entity = self.mapper.to_entity(dto)?;
        let updated = self.service.update(entity).await?;
        Ok(self.mapper.to_dto(updated))
    }

    /// Succeeds whether or not the entity existed.
    pub async fn delete(&self, id: Id) -> Result<(), ApiError> {
        self.service.delete(id).await?;
        Ok(())
    }
}
