use sea_orm_migration::prelude::*;

use crate::{
    m20250301_000001_create_catalog::Screening,
    m20250301_000002_create_audience::{Attendance, Award},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_screening_date_time")
                    .table(Screening::Table)
                    .col(Screening::Date)
                    .col(Screening::Time)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_purchase_date")
                    .table(Attendance::Table)
                    .col(Attendance::PurchaseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_award_movie")
                    .table(Award::Table)
                    .col(Award::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_award_movie").table(Award::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_attendance_purchase_date")
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_screening_date_time").table(Screening::Table).to_owned(),
            )
            .await?;

        Ok(())
    }
}
