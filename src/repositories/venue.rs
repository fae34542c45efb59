use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{
    db::ConnectionProvider,
    entities::venue,
    error::{RepoError, RepoResult},
    models::Venue,
};

pub struct VenueRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl VenueRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: venue::Model) -> Venue {
    Venue {
        id: Some(row.id),
        name: row.name,
        address: row.address,
        capacity: row.capacity,
        venue_type: row.venue_type,
        city_id: row.city_id,
        status: row.status,
    }
}

fn to_active(venue: &Venue) -> venue::ActiveModel {
    venue::ActiveModel {
        id: NotSet,
        name: Set(venue.name.clone()),
        address: Set(venue.address.clone()),
        capacity: Set(venue.capacity),
        venue_type: Set(venue.venue_type.clone()),
        city_id: Set(venue.city_id),
        status: Set(venue.status.clone()),
    }
}

#[async_trait]
impl Repository for VenueRepository {
    type Record = Venue;

    async fn get_all(&self) -> RepoResult<Vec<Venue>> {
        let db = self.connections.open().await?;
        let rows = venue::Entity::find().order_by_asc(venue::Column::Id).all(&db).await?;
        debug!(count = rows.len(), "loaded venues");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<Venue>> {
        let db = self.connections.open().await?;
        Ok(venue::Entity::find_by_id(*id).one(&db).await?.map(to_record))
    }

    async fn add(&self, venue: &Venue) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = venue::Entity::insert(to_active(venue)).exec(&db).await?;
        debug!(id = result.last_insert_id, city_id = venue.city_id, "inserted venue");
        Ok(result.last_insert_id)
    }

    async fn update(&self, venue: &Venue) -> RepoResult<bool> {
        let id = venue.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = venue::Entity::update_many()
            .set(to_active(venue))
            .filter(venue::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        venue::Entity::delete_many()
            .filter(venue::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        Ok(())
    }
}
