//! Initial schema: guests, money, and operations tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::RoomNo).string().not_null().unique_key())
                    .col(ColumnDef::new(Rooms::Floor).integer().not_null())
                    .col(ColumnDef::new(Rooms::RoomType).string().not_null())
                    .col(ColumnDef::new(Rooms::Rate).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Rooms::MaxOccupancy).integer().not_null())
                    .col(ColumnDef::new(Rooms::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Rooms::CurrentFolio).string())
                    .col(ColumnDef::new(Rooms::Description).string())
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::ReservationNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Reservations::GuestName).string().not_null())
                    .col(ColumnDef::new(Reservations::ContactNo).string())
                    .col(ColumnDef::new(Reservations::Email).string())
                    .col(ColumnDef::new(Reservations::FromDate).date().not_null())
                    .col(ColumnDef::new(Reservations::ToDate).date().not_null())
                    .col(ColumnDef::new(Reservations::NoOfRooms).integer().not_null())
                    .col(ColumnDef::new(Reservations::TotalPax).integer())
                    .col(ColumnDef::new(Reservations::Rate).decimal_len(12, 2))
                    .col(ColumnDef::new(Reservations::Tax).decimal_len(12, 2))
                    .col(
                        ColumnDef::new(Reservations::IsTaxInclusive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reservations::TotalAmount).decimal_len(12, 2))
                    .col(ColumnDef::new(Reservations::SelectedRoom).string())
                    .col(ColumnDef::new(Reservations::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Reservations::IsCheckinDone)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reservations::Remarks).string())
                    .col(ColumnDef::new(Reservations::UserId).big_integer())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Checkins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Checkins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Checkins::FolioNo).string().not_null().unique_key())
                    .col(ColumnDef::new(Checkins::GuestName).string().not_null())
                    .col(ColumnDef::new(Checkins::ContactNo).string())
                    .col(ColumnDef::new(Checkins::Email).string())
                    .col(ColumnDef::new(Checkins::CheckInDate).date().not_null())
                    .col(ColumnDef::new(Checkins::CheckOutDate).date())
                    .col(ColumnDef::new(Checkins::RoomNo).string().not_null())
                    .col(ColumnDef::new(Checkins::Rate).decimal_len(12, 2))
                    .col(ColumnDef::new(Checkins::NoOfPersons).integer())
                    .col(ColumnDef::new(Checkins::ReservationNo).string())
                    .col(ColumnDef::new(Checkins::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Checkins::AuditDate).date().not_null())
                    .col(ColumnDef::new(Checkins::Remarks).string())
                    .col(ColumnDef::new(Checkins::UserId).big_integer())
                    .col(
                        ColumnDef::new(Checkins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Checkins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_checkins_reservation_no")
                    .table(Checkins::Table)
                    .col(Checkins::ReservationNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Advances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Advances::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Advances::FolioNo).string())
                    .col(ColumnDef::new(Advances::ReservationNo).string())
                    .col(ColumnDef::new(Advances::GuestName).string().not_null())
                    .col(ColumnDef::new(Advances::PaymentMode).string().not_null())
                    .col(ColumnDef::new(Advances::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Advances::PaymentDate).date().not_null())
                    .col(ColumnDef::new(Advances::ReferenceNo).string())
                    .col(ColumnDef::new(Advances::RoomNo).string())
                    .col(ColumnDef::new(Advances::Remarks).string())
                    .col(ColumnDef::new(Advances::UserId).big_integer())
                    .col(
                        ColumnDef::new(Advances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advances::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advances_folio_no")
                    .table(Advances::Table)
                    .col(Advances::FolioNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advances_reservation_no")
                    .table(Advances::Table)
                    .col(Advances::ReservationNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostTransactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostTransactions::FolioNo).string().not_null())
                    .col(ColumnDef::new(PostTransactions::ReservationNo).string())
                    .col(ColumnDef::new(PostTransactions::RoomNo).string())
                    .col(ColumnDef::new(PostTransactions::GuestName).string())
                    .col(ColumnDef::new(PostTransactions::TransDate).date().not_null())
                    .col(ColumnDef::new(PostTransactions::AccHead).string().not_null())
                    .col(ColumnDef::new(PostTransactions::VoucherNo).string())
                    .col(
                        ColumnDef::new(PostTransactions::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PostTransactions::Narration).string())
                    .col(
                        ColumnDef::new(PostTransactions::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PostTransactions::UserId).big_integer())
                    .col(
                        ColumnDef::new(PostTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostTransactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_transactions_folio_no")
                    .table(PostTransactions::Table)
                    .col(PostTransactions::FolioNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FoBills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoBills::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FoBills::BillNo).string().not_null().unique_key())
                    .col(ColumnDef::new(FoBills::FolioNo).string().not_null())
                    .col(ColumnDef::new(FoBills::GuestName).string())
                    .col(ColumnDef::new(FoBills::RoomNo).string())
                    .col(ColumnDef::new(FoBills::BillDate).date().not_null())
                    .col(
                        ColumnDef::new(FoBills::GrossAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoBills::TaxAmount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(FoBills::NetAmount).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(FoBills::AdvanceAdjusted)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoBills::BalanceDue)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoBills::IsSettled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(FoBills::Remarks).string())
                    .col(ColumnDef::new(FoBills::UserId).big_integer())
                    .col(
                        ColumnDef::new(FoBills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoBills::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fo_bills_folio_no")
                    .table(FoBills::Table)
                    .col(FoBills::FolioNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BillSettlements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BillSettlements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BillSettlements::BillId).big_integer().not_null())
                    .col(ColumnDef::new(BillSettlements::FolioNo).string().not_null())
                    .col(ColumnDef::new(BillSettlements::PaymentMode).string().not_null())
                    .col(
                        ColumnDef::new(BillSettlements::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BillSettlements::PaymentDate).date().not_null())
                    .col(ColumnDef::new(BillSettlements::ReferenceNo).string())
                    .col(ColumnDef::new(BillSettlements::Remarks).string())
                    .col(ColumnDef::new(BillSettlements::UserId).big_integer())
                    .col(
                        ColumnDef::new(BillSettlements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillSettlements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_settlements_bill_id")
                            .from(BillSettlements::Table, BillSettlements::BillId)
                            .to(FoBills::Table, FoBills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bill_settlements_folio_no")
                    .table(BillSettlements::Table)
                    .col(BillSettlements::FolioNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HousekeepingTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HousekeepingTasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HousekeepingTasks::RoomNo).string().not_null())
                    .col(ColumnDef::new(HousekeepingTasks::TaskType).string().not_null())
                    .col(ColumnDef::new(HousekeepingTasks::TaskDate).date().not_null())
                    .col(ColumnDef::new(HousekeepingTasks::AssignedTo).string())
                    .col(
                        ColumnDef::new(HousekeepingTasks::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HousekeepingTasks::Notes).string())
                    .col(
                        ColumnDef::new(HousekeepingTasks::CompletedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(HousekeepingTasks::UserId).big_integer())
                    .col(
                        ColumnDef::new(HousekeepingTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HousekeepingTasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MaintenanceTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaintenanceTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTickets::TicketNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MaintenanceTickets::RoomNo).string())
                    .col(ColumnDef::new(MaintenanceTickets::Area).string())
                    .col(ColumnDef::new(MaintenanceTickets::Description).string().not_null())
                    .col(
                        ColumnDef::new(MaintenanceTickets::Priority)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTickets::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceTickets::ReportedBy).string())
                    .col(ColumnDef::new(MaintenanceTickets::AssignedTo).string())
                    .col(ColumnDef::new(MaintenanceTickets::VendorId).big_integer())
                    .col(ColumnDef::new(MaintenanceTickets::ReportedDate).date().not_null())
                    .col(
                        ColumnDef::new(MaintenanceTickets::ResolvedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(MaintenanceTickets::ResolutionNotes).string())
                    .col(ColumnDef::new(MaintenanceTickets::UserId).big_integer())
                    .col(
                        ColumnDef::new(MaintenanceTickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vendors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vendors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vendors::Name).string().not_null())
                    .col(ColumnDef::new(Vendors::ServiceType).string().not_null())
                    .col(ColumnDef::new(Vendors::ContactPerson).string())
                    .col(ColumnDef::new(Vendors::ContactNo).string())
                    .col(ColumnDef::new(Vendors::Email).string())
                    .col(ColumnDef::new(Vendors::Address).string())
                    .col(ColumnDef::new(Vendors::Rating).integer())
                    .col(ColumnDef::new(Vendors::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Vendors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vendors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vendors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MaintenanceTickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HousekeepingTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BillSettlements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FoBills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Advances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Checkins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FullName,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    RoomNo,
    Floor,
    RoomType,
    Rate,
    MaxOccupancy,
    Status,
    CurrentFolio,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    ReservationNo,
    GuestName,
    ContactNo,
    Email,
    FromDate,
    ToDate,
    NoOfRooms,
    TotalPax,
    Rate,
    Tax,
    IsTaxInclusive,
    TotalAmount,
    SelectedRoom,
    Status,
    IsCheckinDone,
    Remarks,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Checkins {
    Table,
    Id,
    FolioNo,
    GuestName,
    ContactNo,
    Email,
    CheckInDate,
    CheckOutDate,
    RoomNo,
    Rate,
    NoOfPersons,
    ReservationNo,
    Status,
    AuditDate,
    Remarks,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Advances {
    Table,
    Id,
    FolioNo,
    ReservationNo,
    GuestName,
    PaymentMode,
    Amount,
    PaymentDate,
    ReferenceNo,
    RoomNo,
    Remarks,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PostTransactions {
    Table,
    Id,
    FolioNo,
    ReservationNo,
    RoomNo,
    GuestName,
    TransDate,
    AccHead,
    VoucherNo,
    Amount,
    Narration,
    Status,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FoBills {
    Table,
    Id,
    BillNo,
    FolioNo,
    GuestName,
    RoomNo,
    BillDate,
    GrossAmount,
    TaxAmount,
    NetAmount,
    AdvanceAdjusted,
    BalanceDue,
    IsSettled,
    Remarks,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BillSettlements {
    Table,
    Id,
    BillId,
    FolioNo,
    PaymentMode,
    Amount,
    PaymentDate,
    ReferenceNo,
    Remarks,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HousekeepingTasks {
    Table,
    Id,
    RoomNo,
    TaskType,
    TaskDate,
    AssignedTo,
    Status,
    Notes,
    CompletedAt,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MaintenanceTickets {
    Table,
    Id,
    TicketNo,
    RoomNo,
    Area,
    Description,
    Priority,
    Status,
    ReportedBy,
    AssignedTo,
    VendorId,
    ReportedDate,
    ResolvedAt,
    ResolutionNotes,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vendors {
    Table,
    Id,
    Name,
    ServiceType,
    ContactPerson,
    ContactNo,
    Email,
    Address,
    Rating,
    Status,
    CreatedAt,
    UpdatedAt,
}
