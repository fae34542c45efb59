use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::{Repository, parse_date};
use crate::{
    db::ConnectionProvider,
    entities::screening,
    error::{RepoError, RepoResult},
    models::Screening,
};

pub struct ScreeningRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl ScreeningRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: screening::Model) -> RepoResult<Screening> {
    Ok(Screening {
        id: Some(row.id),
        date: parse_date(&row.date)?,
        time: row.time,
        ticket_price: row.ticket_price,
        status: row.status,
        notes: row.notes,
        venue_id: row.venue_id,
    })
}

fn to_active(screening: &Screening) -> screening::ActiveModel {
    screening::ActiveModel {
        id: NotSet,
        date: Set(screening.date.to_string()),
        time: Set(screening.time.clone()),
        ticket_price: Set(screening.ticket_price),
        status: Set(screening.status.clone()),
        notes: Set(screening.notes.clone()),
        venue_id: Set(screening.venue_id),
    }
}

#[async_trait]
impl Repository for ScreeningRepository {
    type Record = Screening;

    /// Most recent day first, then in running order within the day.
    async fn get_all(&self) -> RepoResult<Vec<Screening>> {
        let db = self.connections.open().await?;
        let rows = screening::Entity::find()
            .order_by_desc(screening::Column::Date)
            .order_by_asc(screening::Column::Time)
            .all(&db)
            .await?;
        debug!(count = rows.len(), "loaded screenings");
        rows.into_iter().map(to_record).collect()
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<Screening>> {
        let db = self.connections.open().await?;
        screening::Entity::find_by_id(*id).one(&db).await?.map(to_record).transpose()
    }

    async fn add(&self, screening: &Screening) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = screening::Entity::insert(to_active(screening)).exec(&db).await?;
        debug!(
            id = result.last_insert_id,
            date = %screening.date,
            venue_id = screening.venue_id,
            "inserted screening"
        );
        Ok(result.last_insert_id)
    }

    async fn update(&self, screening: &Screening) -> RepoResult<bool> {
        let id = screening.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = screening::Entity::update_many()
            .set(to_active(screening))
            .filter(screening::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        screening::Entity::delete_many()
            .filter(screening::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        Ok(())
    }
}
