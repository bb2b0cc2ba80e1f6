//! Schedules service (working hours and blocks)

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{
        block::{Block, CreateBlock},
        working_hours::{UpsertWorkingHours, Weekday, WorkingHours},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Working hours ----

    pub async fn list_working_hours(&self, employee_id: i32) -> AppResult<Vec<WorkingHours>> {
        // 404 for unknown employees, empty list for no configuration
        self.repository.employees.get_by_id(employee_id).await?;
        self.repository.working_hours.list(employee_id).await
    }

    pub async fn upsert_working_hours(
        &self,
        employee_id: i32,
        data: &UpsertWorkingHours,
    ) -> AppResult<WorkingHours> {
        self.repository.employees.get_by_id(employee_id).await?;
        self.repository.working_hours.upsert(employee_id, data).await
    }

    pub async fn delete_working_hours(&self, employee_id: i32, weekday: Weekday) -> AppResult<()> {
        self.repository
            .working_hours
            .delete(employee_id, weekday)
            .await
    }

    // ---- Blocks ----

    pub async fn list_blocks(
        &self,
        employee_id: i32,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Block>> {
        self.repository.employees.get_by_id(employee_id).await?;
        self.repository.blocks.list(employee_id, date).await
    }

    pub async fn create_block(&self, employee_id: i32, data: &CreateBlock) -> AppResult<Block> {
        self.repository.employees.get_by_id(employee_id).await?;
        self.repository.blocks.create(employee_id, data).await
    }

    pub async fn delete_block(&self, id: i32) -> AppResult<()> {
        self.repository.blocks.delete(id).await
    }
}
