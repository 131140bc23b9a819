//! Vendor repository for external service provider operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{vendors, sea_orm_active_enums::VendorStatus};

/// Error types for vendor operations.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    /// Vendor not found.
    #[error("Vendor not found: {0}")]
    NotFound(i64),

    /// Rating out of the 1 to 5 range.
    #[error("Vendor rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a vendor.
#[derive(Debug, Clone)]
pub struct CreateVendorInput {
    /// Vendor name.
    pub name: String,
    /// Service type (e.g. `PLUMBING`, `ELECTRICAL`, `LAUNDRY`).
    pub service_type: String,
    /// Contact person.
    pub contact_person: Option<String>,
    /// Contact number.
    pub contact_no: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Address.
    pub address: Option<String>,
}

/// Input for updating a vendor. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateVendorInput {
    /// New name.
    pub name: Option<String>,
    /// New service type.
    pub service_type: Option<String>,
    /// New contact person.
    pub contact_person: Option<String>,
    /// New contact number.
    pub contact_no: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New status.
    pub status: Option<VendorStatus>,
}

/// Vendor repository for CRUD and rating.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a vendor, initially active and unrated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_vendor(&self, input: CreateVendorInput) -> Result<vendors::Model, VendorError> {
        let now = Utc::now().into();
        let vendor = vendors::ActiveModel {
            name: Set(input.name),
            service_type: Set(input.service_type),
            contact_person: Set(input.contact_person),
            contact_no: Set(input.contact_no),
            email: Set(input.email),
            address: Set(input.address),
            rating: Set(None),
            status: Set(VendorStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = vendor.insert(&self.db).await?;
        Ok(result)
    }

    /// Gets a vendor by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor is not found or the query fails.
    pub async fn get_vendor(&self, id: i64) -> Result<vendors::Model, VendorError> {
        let vendor = vendors::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(VendorError::NotFound(id))?;
        Ok(vendor)
    }

    /// Lists vendors, optionally restricted to a service type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_vendors(
        &self,
        service_type: Option<&str>,
    ) -> Result<Vec<vendors::Model>, VendorError> {
        let mut query = vendors::Entity::find();

        if let Some(service_type) = service_type {
            query = query.filter(vendors::Column::ServiceType.eq(service_type));
        }

        let vendors = query.order_by_asc(vendors::Column::Name).all(&self.db).await?;
        Ok(vendors)
    }

    /// Updates a vendor.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor is not found or the database
    /// operation fails.
    pub async fn update_vendor(
        &self,
        id: i64,
        input: UpdateVendorInput,
    ) -> Result<vendors::Model, VendorError> {
        let vendor = self.get_vendor(id).await?;
        let mut active: vendors::ActiveModel = vendor.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(service_type) = input.service_type {
            active.service_type = Set(service_type);
        }
        if let Some(contact_person) = input.contact_person {
            active.contact_person = Set(Some(contact_person));
        }
        if let Some(contact_no) = input.contact_no {
            active.contact_no = Set(Some(contact_no));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Rates a vendor from 1 to 5.
    ///
    /// # Errors
    ///
    /// Returns an error if the rating is out of range, the vendor is not
    /// found, or the database operation fails.
    pub async fn rate_vendor(&self, id: i64, rating: i32) -> Result<vendors::Model, VendorError> {
        if !(1..=5).contains(&rating) {
            return Err(VendorError::InvalidRating(rating));
        }

        let vendor = self.get_vendor(id).await?;
        let mut active: vendors::ActiveModel = vendor.into();
        active.rating = Set(Some(rating));
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
