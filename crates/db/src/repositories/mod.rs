//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod advance;
pub mod billing;
pub mod checkin;
pub mod housekeeping;
pub mod maintenance;
pub mod post_transaction;
pub mod reservation;
pub mod room;
pub mod user;
pub mod vendor;

pub use advance::{AdvanceError, AdvanceRepository, CreateAdvanceInput, UpdateAdvanceInput};
pub use billing::{BillingError, BillingRepository, CreateSettlementInput, FolioStatement};
pub use checkin::{CheckinError, CheckinRepository, CreateCheckinInput, UpdateCheckinInput};
pub use housekeeping::{CreateTaskInput, HousekeepingError, HousekeepingRepository, TaskFilter};
pub use maintenance::{
    CreateTicketInput, MaintenanceError, MaintenanceRepository, TicketFilter,
};
pub use post_transaction::{
    CreateChargeInput, PostTransactionError, PostTransactionRepository, UpdateChargeInput,
};
pub use reservation::{
    CreateReservationInput, ReservationError, ReservationFilter, ReservationRepository,
    UpdateReservationInput,
};
pub use room::{CreateRoomInput, RoomError, RoomRepository, UpdateRoomInput};
pub use user::{RegisterUserInput, UserError, UserRepository};
pub use vendor::{CreateVendorInput, UpdateVendorInput, VendorError, VendorRepository};
