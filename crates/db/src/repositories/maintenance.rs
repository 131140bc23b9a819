//! Maintenance repository for ticket operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use innkeep_shared::types::{DocumentKind, DocumentNo};

use crate::entities::{
    maintenance_tickets, vendors,
    sea_orm_active_enums::{TicketPriority, TicketStatus},
};

/// Error types for maintenance operations.
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    /// Ticket not found by ID.
    #[error("Maintenance ticket not found: {0}")]
    NotFound(i64),

    /// Ticket not found by number.
    #[error("Maintenance ticket not found: {0}")]
    NotFoundByNo(String),

    /// The ticket is already closed.
    #[error("Maintenance ticket {0} is already closed")]
    AlreadyClosed(String),

    /// Vendor not found.
    #[error("Vendor not found: {0}")]
    VendorNotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for raising a maintenance ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketInput {
    /// Affected room, if room-specific.
    pub room_no: Option<String>,
    /// Affected common area, if not room-specific.
    pub area: Option<String>,
    /// Problem description.
    pub description: String,
    /// Priority.
    pub priority: TicketPriority,
    /// Who reported the problem.
    pub reported_by: Option<String>,
    /// User who raised the ticket.
    pub user_id: Option<i64>,
}

/// Filter options for listing tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Filter by status.
    pub status: Option<TicketStatus>,
    /// Filter by priority.
    pub priority: Option<TicketPriority>,
    /// Filter by room.
    pub room_no: Option<String>,
}

/// Maintenance repository for ticket lifecycle.
#[derive(Debug, Clone)]
pub struct MaintenanceRepository {
    db: DatabaseConnection,
}

impl MaintenanceRepository {
    /// Creates a new maintenance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Raises a ticket with a fresh `MNT/YYYYMM/NNNN` number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_ticket(
        &self,
        input: CreateTicketInput,
    ) -> Result<maintenance_tickets::Model, MaintenanceError> {
        let today = Utc::now().date_naive();
        let prefix = DocumentNo::month_prefix(DocumentKind::MaintenanceTicket, today);
        let existing = maintenance_tickets::Entity::find()
            .filter(maintenance_tickets::Column::TicketNo.starts_with(&prefix))
            .count(&self.db)
            .await?;
        let ticket_no = DocumentNo::next_in_month(DocumentKind::MaintenanceTicket, today, existing);

        let now = Utc::now().into();
        let ticket = maintenance_tickets::ActiveModel {
            ticket_no: Set(ticket_no.into_inner()),
            room_no: Set(input.room_no),
            area: Set(input.area),
            description: Set(input.description),
            priority: Set(input.priority),
            status: Set(TicketStatus::Pending),
            reported_by: Set(input.reported_by),
            assigned_to: Set(None),
            vendor_id: Set(None),
            reported_date: Set(today),
            resolved_at: Set(None),
            resolution_notes: Set(None),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = ticket.insert(&self.db).await?;
        Ok(result)
    }

    /// Gets a ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found or the query fails.
    pub async fn get_ticket(&self, id: i64) -> Result<maintenance_tickets::Model, MaintenanceError> {
        let ticket = maintenance_tickets::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(MaintenanceError::NotFound(id))?;
        Ok(ticket)
    }

    /// Lists tickets with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_tickets(
        &self,
        filter: TicketFilter,
    ) -> Result<Vec<maintenance_tickets::Model>, MaintenanceError> {
        let mut query = maintenance_tickets::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(maintenance_tickets::Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(maintenance_tickets::Column::Priority.eq(priority));
        }
        if let Some(room_no) = filter.room_no {
            query = query.filter(maintenance_tickets::Column::RoomNo.eq(room_no));
        }

        let tickets = query
            .order_by_desc(maintenance_tickets::Column::ReportedDate)
            .order_by_desc(maintenance_tickets::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(tickets)
    }

    /// Assigns a ticket to in-house staff or an external vendor.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found or closed, a given
    /// vendor does not exist, or the database operation fails.
    pub async fn assign_ticket(
        &self,
        id: i64,
        assigned_to: Option<String>,
        vendor_id: Option<i64>,
    ) -> Result<maintenance_tickets::Model, MaintenanceError> {
        let ticket = self.get_ticket(id).await?;

        if matches!(ticket.status, TicketStatus::Completed | TicketStatus::Cancelled) {
            return Err(MaintenanceError::AlreadyClosed(ticket.ticket_no));
        }

        if let Some(vendor_id) = vendor_id {
            let vendor = vendors::Entity::find_by_id(vendor_id).one(&self.db).await?;
            if vendor.is_none() {
                return Err(MaintenanceError::VendorNotFound(vendor_id));
            }
        }

        let mut active: maintenance_tickets::ActiveModel = ticket.into();
        active.assigned_to = Set(assigned_to);
        active.vendor_id = Set(vendor_id);
        active.status = Set(TicketStatus::Assigned);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Moves an assigned ticket into progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found or closed, or the
    /// database operation fails.
    pub async fn start_ticket(&self, id: i64) -> Result<maintenance_tickets::Model, MaintenanceError> {
        let ticket = self.get_ticket(id).await?;

        if matches!(ticket.status, TicketStatus::Completed | TicketStatus::Cancelled) {
            return Err(MaintenanceError::AlreadyClosed(ticket.ticket_no));
        }

        let mut active: maintenance_tickets::ActiveModel = ticket.into();
        active.status = Set(TicketStatus::InProgress);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Completes a ticket with resolution notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found or closed, or the
    /// database operation fails.
    pub async fn complete_ticket(
        &self,
        id: i64,
        resolution_notes: Option<String>,
    ) -> Result<maintenance_tickets::Model, MaintenanceError> {
        let ticket = self.get_ticket(id).await?;

        if matches!(ticket.status, TicketStatus::Completed | TicketStatus::Cancelled) {
            return Err(MaintenanceError::AlreadyClosed(ticket.ticket_no));
        }

        let now = Utc::now().into();
        let mut active: maintenance_tickets::ActiveModel = ticket.into();
        active.status = Set(TicketStatus::Completed);
        active.resolved_at = Set(Some(now));
        active.resolution_notes = Set(resolution_notes);
        active.updated_at = Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Cancels an open ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found or closed, or the
    /// database operation fails.
    pub async fn cancel_ticket(&self, id: i64) -> Result<maintenance_tickets::Model, MaintenanceError> {
        let ticket = self.get_ticket(id).await?;

        if matches!(ticket.status, TicketStatus::Completed | TicketStatus::Cancelled) {
            return Err(MaintenanceError::AlreadyClosed(ticket.ticket_no));
        }

        let mut active: maintenance_tickets::ActiveModel = ticket.into();
        active.status = Set(TicketStatus::Cancelled);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
