use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::{Repository, pair_condition};
use crate::{
    db::ConnectionProvider,
    entities::projection,
    error::RepoResult,
    models::{Projection, ProjectionKey},
};

pub struct ProjectionRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl ProjectionRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: projection::Model) -> Projection {
    Projection {
        screening_id: row.screening_id,
        movie_id: row.movie_id,
        position: row.position,
        notes: row.notes,
    }
}

fn keys_of(key: &ProjectionKey) -> (i32, i32) {
    (key.screening_id, key.movie_id)
}

#[async_trait]
impl Repository for ProjectionRepository {
    type Record = Projection;

    async fn get_all(&self) -> RepoResult<Vec<Projection>> {
        let db = self.connections.open().await?;
        let rows = projection::Entity::find()
            .order_by_asc(projection::Column::ScreeningId)
            .order_by_asc(projection::Column::MovieId)
            .all(&db)
            .await?;
        debug!(count = rows.len(), "loaded projections");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, key: &ProjectionKey) -> RepoResult<Option<Projection>> {
        let db = self.connections.open().await?;
        let row = projection::Entity::find_by_id((key.screening_id, key.movie_id)).one(&db).await?;
        Ok(row.map(to_record))
    }

    async fn add(&self, projection: &Projection) -> RepoResult<ProjectionKey> {
        let db = self.connections.open().await?;
        let row = projection::ActiveModel {
            screening_id: Set(projection.screening_id),
            movie_id: Set(projection.movie_id),
            position: Set(projection.position),
            notes: Set(projection.notes.clone()),
        };
        projection::Entity::insert(row).exec_without_returning(&db).await?;
        debug!(
            screening_id = projection.screening_id,
            movie_id = projection.movie_id,
            "inserted projection"
        );
        Ok(ProjectionKey { screening_id: projection.screening_id, movie_id: projection.movie_id })
    }

    async fn update(&self, projection: &Projection) -> RepoResult<bool> {
        let db = self.connections.open().await?;
        let changes = projection::ActiveModel {
            screening_id: NotSet,
            movie_id: NotSet,
            position: Set(projection.position),
            notes: Set(projection.notes.clone()),
        };
        let result = projection::Entity::update_many()
            .set(changes)
            .filter(projection::Column::ScreeningId.eq(projection.screening_id))
            .filter(projection::Column::MovieId.eq(projection.movie_id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, keys: &[ProjectionKey]) -> RepoResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        projection::Entity::delete_many()
            .filter(pair_condition(
                keys,
                projection::Column::ScreeningId,
                projection::Column::MovieId,
                keys_of,
            ))
            .exec(&db)
            .await?;
        Ok(())
    }
}
