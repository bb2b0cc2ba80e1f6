//! Catalog service (bookable services)

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::service::{CreateService, Service, UpdateService},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Service>> {
        self.repository.catalog.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Service> {
        self.repository.catalog.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateService) -> AppResult<Service> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.catalog.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateService) -> AppResult<Service> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.catalog.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.catalog.delete(id).await
    }
}
