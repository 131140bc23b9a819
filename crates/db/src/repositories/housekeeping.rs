//! Housekeeping repository for room task operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{
    housekeeping_tasks, rooms,
    sea_orm_active_enums::{RoomStatus, TaskStatus},
};

/// Error types for housekeeping operations.
#[derive(Debug, thiserror::Error)]
pub enum HousekeepingError {
    /// Task not found.
    #[error("Housekeeping task not found: {0}")]
    NotFound(i64),

    /// The task is already completed.
    #[error("Housekeeping task {0} is already completed")]
    AlreadyCompleted(i64),

    /// Room not found.
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a housekeeping task.
#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    /// Room the task is for.
    pub room_no: String,
    /// Task type (e.g. `CLEANING`, `TURNDOWN`, `INSPECTION`).
    pub task_type: String,
    /// Scheduled date.
    pub task_date: NaiveDate,
    /// Staff member assigned, if known at creation.
    pub assigned_to: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// User who created the task.
    pub user_id: Option<i64>,
}

/// Filter options for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Filter by status.
    pub status: Option<TaskStatus>,
    /// Filter by room.
    pub room_no: Option<String>,
    /// Filter by scheduled date.
    pub task_date: Option<NaiveDate>,
}

/// Housekeeping repository for task lifecycle.
#[derive(Debug, Clone)]
pub struct HousekeepingRepository {
    db: DatabaseConnection,
}

impl HousekeepingRepository {
    /// Creates a new housekeeping repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a task. Tasks with an assignee start in progress, otherwise
    /// pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the database
    /// operation fails.
    pub async fn create_task(
        &self,
        input: CreateTaskInput,
    ) -> Result<housekeeping_tasks::Model, HousekeepingError> {
        let room = rooms::Entity::find()
            .filter(rooms::Column::RoomNo.eq(input.room_no.as_str()))
            .one(&self.db)
            .await?;
        if room.is_none() {
            return Err(HousekeepingError::RoomNotFound(input.room_no));
        }

        let status = if input.assigned_to.is_some() {
            TaskStatus::InProgress
        } else {
            TaskStatus::Pending
        };

        let now = Utc::now().into();
        let task = housekeeping_tasks::ActiveModel {
            room_no: Set(input.room_no),
            task_type: Set(input.task_type),
            task_date: Set(input.task_date),
            assigned_to: Set(input.assigned_to),
            status: Set(status),
            notes: Set(input.notes),
            completed_at: Set(None),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = task.insert(&self.db).await?;
        Ok(result)
    }

    /// Gets a task by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is not found or the query fails.
    pub async fn get_task(&self, id: i64) -> Result<housekeeping_tasks::Model, HousekeepingError> {
        let task = housekeeping_tasks::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(HousekeepingError::NotFound(id))?;
        Ok(task)
    }

    /// Lists tasks with optional filters, earliest scheduled first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_tasks(
        &self,
        filter: TaskFilter,
    ) -> Result<Vec<housekeeping_tasks::Model>, HousekeepingError> {
        let mut query = housekeeping_tasks::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(housekeeping_tasks::Column::Status.eq(status));
        }
        if let Some(room_no) = filter.room_no {
            query = query.filter(housekeeping_tasks::Column::RoomNo.eq(room_no));
        }
        if let Some(task_date) = filter.task_date {
            query = query.filter(housekeeping_tasks::Column::TaskDate.eq(task_date));
        }

        let tasks = query
            .order_by_asc(housekeeping_tasks::Column::TaskDate)
            .order_by_asc(housekeeping_tasks::Column::RoomNo)
            .all(&self.db)
            .await?;
        Ok(tasks)
    }

    /// Assigns a task to a staff member, moving it into progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is not found, already completed, or the
    /// database operation fails.
    pub async fn assign_task(
        &self,
        id: i64,
        assigned_to: String,
    ) -> Result<housekeeping_tasks::Model, HousekeepingError> {
        let task = self.get_task(id).await?;

        if task.status == TaskStatus::Completed {
            return Err(HousekeepingError::AlreadyCompleted(id));
        }

        let mut active: housekeeping_tasks::ActiveModel = task.into();
        active.assigned_to = Set(Some(assigned_to));
        active.status = Set(TaskStatus::InProgress);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Completes a task. Finishing a cleaning task on a dirty room puts
    /// the room back in the vacant pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is not found, already completed, or the
    /// database operation fails.
    pub async fn complete_task(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> Result<housekeeping_tasks::Model, HousekeepingError> {
        let task = self.get_task(id).await?;

        if task.status == TaskStatus::Completed {
            return Err(HousekeepingError::AlreadyCompleted(id));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let room_no = task.room_no.clone();
        let is_cleaning = task.task_type.eq_ignore_ascii_case("cleaning");

        let mut active: housekeeping_tasks::ActiveModel = task.into();
        active.status = Set(TaskStatus::Completed);
        active.completed_at = Set(Some(now));
        if let Some(notes) = notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        if is_cleaning {
            let room = rooms::Entity::find()
                .filter(rooms::Column::RoomNo.eq(room_no))
                .one(&txn)
                .await?;
            if let Some(room) = room {
                if room.status == RoomStatus::Dirty {
                    let mut room_active: rooms::ActiveModel = room.into();
                    room_active.status = Set(RoomStatus::Vacant);
                    room_active.updated_at = Set(now);
                    room_active.update(&txn).await?;
                }
            }
        }

        txn.commit().await?;
        Ok(updated)
    }
}
