use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_catalog::{Movie, Screening};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendee::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendee::Id))
                    .col(string(Attendee::Name))
                    .col(string(Attendee::Email))
                    .col(string(Attendee::Phone))
                    .col(integer_null(Attendee::Age))
                    .col(string(Attendee::City))
                    .col(string(Attendee::AttendeeType))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(integer(Attendance::ScreeningId))
                    .col(integer(Attendance::AttendeeId))
                    .col(integer(Attendance::Tickets))
                    .col(string(Attendance::PurchaseDate))
                    .col(string(Attendance::PaymentMethod))
                    .col(string(Attendance::Notes))
                    .primary_key(
                        Index::create().col(Attendance::ScreeningId).col(Attendance::AttendeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_screening")
                            .from(Attendance::Table, Attendance::ScreeningId)
                            .to(Screening::Table, Screening::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_attendee")
                            .from(Attendance::Table, Attendance::AttendeeId)
                            .to(Attendee::Table, Attendee::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Jury::Table)
                    .if_not_exists()
                    .col(pk_auto(Jury::Id))
                    .col(string(Jury::Name))
                    .col(string(Jury::Email))
                    .col(string(Jury::Specialty))
                    .col(string(Jury::Country))
                    .col(integer(Jury::YearsExperience))
                    .col(string(Jury::JuryType))
                    .col(string(Jury::Bio))
                    .to_owned(),
            )
            .await?;

        // jury rows take their participations with them
        manager
            .create_table(
                Table::create()
                    .table(JuryParticipation::Table)
                    .if_not_exists()
                    .col(integer(JuryParticipation::JuryId))
                    .col(integer(JuryParticipation::ScreeningId))
                    .col(string(JuryParticipation::Role))
                    .col(string(JuryParticipation::Notes))
                    .primary_key(
                        Index::create()
                            .col(JuryParticipation::JuryId)
                            .col(JuryParticipation::ScreeningId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jury_participation_jury")
                            .from(JuryParticipation::Table, JuryParticipation::JuryId)
                            .to(Jury::Table, Jury::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jury_participation_screening")
                            .from(JuryParticipation::Table, JuryParticipation::ScreeningId)
                            .to(Screening::Table, Screening::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Evaluation::Table)
                    .if_not_exists()
                    .col(integer(Evaluation::JuryId))
                    .col(integer(Evaluation::MovieId))
                    .col(integer(Evaluation::Score))
                    .col(string(Evaluation::Comment))
                    .col(string_null(Evaluation::EvaluationDate))
                    .col(string(Evaluation::Category))
                    .primary_key(Index::create().col(Evaluation::JuryId).col(Evaluation::MovieId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_jury")
                            .from(Evaluation::Table, Evaluation::JuryId)
                            .to(Jury::Table, Jury::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_movie")
                            .from(Evaluation::Table, Evaluation::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Award::Table)
                    .if_not_exists()
                    .col(pk_auto(Award::Id))
                    .col(integer(Award::MovieId))
                    .col(string(Award::Category))
                    .col(integer(Award::Edition))
                    .col(integer(Award::Rank))
                    .col(string(Award::Description))
                    .col(string_null(Award::AwardDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_award_movie")
                            .from(Award::Table, Award::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Award::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Evaluation::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(JuryParticipation::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Jury::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Attendance::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Attendee::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Attendee {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Age,
    City,
    AttendeeType,
}

#[derive(DeriveIden)]
pub(crate) enum Attendance {
    Table,
    ScreeningId,
    AttendeeId,
    Tickets,
    PurchaseDate,
    PaymentMethod,
    Notes,
}

#[derive(DeriveIden)]
enum Jury {
    Table,
    Id,
    Name,
    Email,
    Specialty,
    Country,
    YearsExperience,
    JuryType,
    Bio,
}

#[derive(DeriveIden)]
enum JuryParticipation {
    Table,
    JuryId,
    ScreeningId,
    Role,
    Notes,
}

#[derive(DeriveIden)]
enum Evaluation {
    Table,
    JuryId,
    MovieId,
    Score,
    Comment,
    EvaluationDate,
    Category,
}

#[derive(DeriveIden)]
pub(crate) enum Award {
    Table,
    Id,
    MovieId,
    Category,
    Edition,
    Rank,
    Description,
    AwardDate,
}
