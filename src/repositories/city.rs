use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{
    db::ConnectionProvider,
    entities::city,
    error::{RepoError, RepoResult},
    models::City,
};

pub struct CityRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl CityRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: city::Model) -> City {
    City {
        id: Some(row.id),
        name: row.name,
        region: row.region,
        country: row.country,
        notes: row.notes,
    }
}

fn to_active(city: &City) -> city::ActiveModel {
    city::ActiveModel {
        id: NotSet,
        name: Set(city.name.clone()),
        region: Set(city.region.clone()),
        country: Set(city.country.clone()),
        notes: Set(city.notes.clone()),
    }
}

#[async_trait]
impl Repository for CityRepository {
    type Record = City;

    async fn get_all(&self) -> RepoResult<Vec<City>> {
        let db = self.connections.open().await?;
        let rows = city::Entity::find().order_by_asc(city::Column::Id).all(&db).await?;
        debug!(count = rows.len(), "loaded cities");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<City>> {
        let db = self.connections.open().await?;
        Ok(city::Entity::find_by_id(*id).one(&db).await?.map(to_record))
    }

    async fn add(&self, city: &City) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = city::Entity::insert(to_active(city)).exec(&db).await?;
        debug!(id = result.last_insert_id, name = %city.name, "inserted city");
        Ok(result.last_insert_id)
    }

    async fn update(&self, city: &City) -> RepoResult<bool> {
        let id = city.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = city::Entity::update_many()
            .set(to_active(city))
            .filter(city::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        let result = city::Entity::delete_many()
            .filter(city::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        debug!(requested = ids.len(), deleted = result.rows_affected, "deleted cities");
        Ok(())
    }
}
