//! Room repository for room inventory operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{rooms, sea_orm_active_enums::RoomStatus};

/// Error types for room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Room not found by ID.
    #[error("Room not found: {0}")]
    NotFound(i64),

    /// Room not found by number.
    #[error("Room not found: {0}")]
    NotFoundByNo(String),

    /// A room with this number already exists.
    #[error("Room {0} already exists")]
    DuplicateRoomNo(String),

    /// The room is occupied and cannot be changed this way.
    #[error("Room {0} is occupied")]
    Occupied(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a room.
#[derive(Debug, Clone)]
pub struct CreateRoomInput {
    /// Room number.
    pub room_no: String,
    /// Floor.
    pub floor: i32,
    /// Room type (e.g. `DELUXE`, `SUITE`).
    pub room_type: String,
    /// Nightly rate.
    pub rate: Decimal,
    /// Maximum occupancy.
    pub max_occupancy: i32,
    /// Description.
    pub description: Option<String>,
}

/// Input for updating a room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoomInput {
    /// New floor.
    pub floor: Option<i32>,
    /// New room type.
    pub room_type: Option<String>,
    /// New rate.
    pub rate: Option<Decimal>,
    /// New maximum occupancy.
    pub max_occupancy: Option<i32>,
    /// New description.
    pub description: Option<String>,
}

/// Room repository for CRUD and status operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    db: DatabaseConnection,
}

impl RoomRepository {
    /// Creates a new room repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a room, initially vacant.
    ///
    /// # Errors
    ///
    /// Returns an error if the room number is taken or the database
    /// operation fails.
    pub async fn create_room(&self, input: CreateRoomInput) -> Result<rooms::Model, RoomError> {
        let existing = rooms::Entity::find()
            .filter(rooms::Column::RoomNo.eq(input.room_no.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(RoomError::DuplicateRoomNo(input.room_no));
        }

        let now = Utc::now().into();
        let room = rooms::ActiveModel {
            room_no: Set(input.room_no),
            floor: Set(input.floor),
            room_type: Set(input.room_type),
            rate: Set(input.rate),
            max_occupancy: Set(input.max_occupancy),
            status: Set(RoomStatus::Vacant),
            current_folio: Set(None),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = room.insert(&self.db).await?;
        Ok(result)
    }

    /// Gets a room by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not found or the query fails.
    pub async fn get_room(&self, id: i64) -> Result<rooms::Model, RoomError> {
        let room = rooms::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RoomError::NotFound(id))?;
        Ok(room)
    }

    /// Gets a room by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not found or the query fails.
    pub async fn get_by_room_no(&self, room_no: &str) -> Result<rooms::Model, RoomError> {
        let room = rooms::Entity::find()
            .filter(rooms::Column::RoomNo.eq(room_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| RoomError::NotFoundByNo(room_no.to_string()))?;
        Ok(room)
    }

    /// Lists all rooms ordered by room number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_rooms(&self) -> Result<Vec<rooms::Model>, RoomError> {
        let rooms = rooms::Entity::find()
            .order_by_asc(rooms::Column::RoomNo)
            .all(&self.db)
            .await?;
        Ok(rooms)
    }

    /// Lists vacant rooms, optionally restricted to a room type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_available(
        &self,
        room_type: Option<&str>,
    ) -> Result<Vec<rooms::Model>, RoomError> {
        let mut query = rooms::Entity::find().filter(rooms::Column::Status.eq(RoomStatus::Vacant));

        if let Some(room_type) = room_type {
            query = query.filter(rooms::Column::RoomType.eq(room_type));
        }

        let rooms = query.order_by_asc(rooms::Column::RoomNo).all(&self.db).await?;
        Ok(rooms)
    }

    /// Updates a room's static attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not found or the database operation
    /// fails.
    pub async fn update_room(
        &self,
        id: i64,
        input: UpdateRoomInput,
    ) -> Result<rooms::Model, RoomError> {
        let room = self.get_room(id).await?;
        let mut active: rooms::ActiveModel = room.into();

        if let Some(floor) = input.floor {
            active.floor = Set(floor);
        }
        if let Some(room_type) = input.room_type {
            active.room_type = Set(room_type);
        }
        if let Some(rate) = input.rate {
            active.rate = Set(rate);
        }
        if let Some(max_occupancy) = input.max_occupancy {
            active.max_occupancy = Set(max_occupancy);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Sets a room's housekeeping status. Occupied rooms can only be
    /// released through checkout, so this rejects `occupied` both ways.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not found, the room is occupied, or
    /// the database operation fails.
    pub async fn set_status(
        &self,
        room_no: &str,
        status: RoomStatus,
    ) -> Result<rooms::Model, RoomError> {
        let room = self.get_by_room_no(room_no).await?;

        if room.status == RoomStatus::Occupied || status == RoomStatus::Occupied {
            return Err(RoomError::Occupied(room.room_no));
        }

        let mut active: rooms::ActiveModel = room.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a room that is not occupied.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not found, occupied, or the database
    /// operation fails.
    pub async fn delete_room(&self, id: i64) -> Result<(), RoomError> {
        let room = self.get_room(id).await?;

        if room.status == RoomStatus::Occupied {
            return Err(RoomError::Occupied(room.room_no));
        }

        room.delete(&self.db).await?;
        Ok(())
    }
}
