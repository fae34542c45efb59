use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    .col(pk_auto(City::Id))
                    .col(string(City::Name))
                    .col(string(City::Region))
                    .col(string(City::Country))
                    .col(string(City::Notes))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(pk_auto(Venue::Id))
                    .col(string(Venue::Name))
                    .col(string(Venue::Address))
                    .col(integer(Venue::Capacity))
                    .col(string(Venue::VenueType))
                    .col(integer(Venue::CityId))
                    .col(string(Venue::Status))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_city")
                            .from(Venue::Table, Venue::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string(Movie::Title))
                    .col(string(Movie::Country))
                    .col(string(Movie::Director))
                    .col(integer(Movie::DurationMinutes))
                    .col(string(Movie::Genre))
                    .col(string(Movie::Rating))
                    .col(string(Movie::Synopsis))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Screening::Table)
                    .if_not_exists()
                    .col(pk_auto(Screening::Id))
                    .col(string(Screening::Date))
                    .col(string(Screening::Time))
                    .col(double(Screening::TicketPrice))
                    .col(string(Screening::Status))
                    .col(string(Screening::Notes))
                    .col(integer(Screening::VenueId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_screening_venue")
                            .from(Screening::Table, Screening::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projection::Table)
                    .if_not_exists()
                    .col(integer(Projection::ScreeningId))
                    .col(integer(Projection::MovieId))
                    .col(integer(Projection::Position))
                    .col(string(Projection::Notes))
                    .primary_key(
                        Index::create().col(Projection::ScreeningId).col(Projection::MovieId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projection_screening")
                            .from(Projection::Table, Projection::ScreeningId)
                            .to(Screening::Table, Screening::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projection_movie")
                            .from(Projection::Table, Projection::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Projection::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Screening::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Venue::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(City::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum City {
    Table,
    Id,
    Name,
    Region,
    Country,
    Notes,
}

#[derive(DeriveIden)]
enum Venue {
    Table,
    Id,
    Name,
    Address,
    Capacity,
    VenueType,
    CityId,
    Status,
}

#[derive(DeriveIden)]
pub(crate) enum Movie {
    Table,
    Id,
    Title,
    Country,
    Director,
    DurationMinutes,
    Genre,
    Rating,
    Synopsis,
}

#[derive(DeriveIden)]
pub(crate) enum Screening {
    Table,
    Id,
    Date,
    Time,
    TicketPrice,
    Status,
    Notes,
    VenueId,
}

#[derive(DeriveIden)]
enum Projection {
    Table,
    ScreeningId,
    MovieId,
    Position,
    Notes,
}
