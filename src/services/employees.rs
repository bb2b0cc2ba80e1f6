//! Employees service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, UpdateEmployee},
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        self.repository.employees.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.employees.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<Employee> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.employees.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.employees.delete(id).await
    }
}
