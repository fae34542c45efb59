use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::{Repository, parse_optional_date};
use crate::{
    db::ConnectionProvider,
    entities::award,
    error::{RepoError, RepoResult},
    models::Award,
};

pub struct AwardRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl AwardRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: award::Model) -> RepoResult<Award> {
    Ok(Award {
        id: Some(row.id),
        movie_id: row.movie_id,
        category: row.category,
        edition: row.edition,
        rank: row.rank,
        description: row.description,
        award_date: parse_optional_date(row.award_date)?,
    })
}

fn to_active(award: &Award) -> award::ActiveModel {
    award::ActiveModel {
        id: NotSet,
        movie_id: Set(award.movie_id),
        category: Set(award.category.clone()),
        edition: Set(award.edition),
        rank: Set(award.rank),
        description: Set(award.description.clone()),
        award_date: Set(award.award_date.map(|d| d.to_string())),
    }
}

#[async_trait]
impl Repository for AwardRepository {
    type Record = Award;

    async fn get_all(&self) -> RepoResult<Vec<Award>> {
        let db = self.connections.open().await?;
        let rows = award::Entity::find().order_by_asc(award::Column::Id).all(&db).await?;
        debug!(count = rows.len(), "loaded awards");
        rows.into_iter().map(to_record).collect()
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<Award>> {
        let db = self.connections.open().await?;
        award::Entity::find_by_id(*id).one(&db).await?.map(to_record).transpose()
    }

    async fn add(&self, award: &Award) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = award::Entity::insert(to_active(award)).exec(&db).await?;
        debug!(id = result.last_insert_id, movie_id = award.movie_id, "inserted award");
        Ok(result.last_insert_id)
    }

    async fn update(&self, award: &Award) -> RepoResult<bool> {
        let id = award.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = award::Entity::update_many()
            .set(to_active(award))
            .filter(award::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        award::Entity::delete_many()
            .filter(award::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        Ok(())
    }
}
