use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::{Repository, pair_condition};
use crate::{
    db::ConnectionProvider,
    entities::jury_participation,
    error::RepoResult,
    models::{JuryParticipation, JuryParticipationKey},
};

pub struct JuryParticipationRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl JuryParticipationRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: jury_participation::Model) -> JuryParticipation {
    JuryParticipation {
        jury_id: row.jury_id,
        screening_id: row.screening_id,
        role: row.role,
        notes: row.notes,
    }
}

#[async_trait]
impl Repository for JuryParticipationRepository {
    type Record = JuryParticipation;

    async fn get_all(&self) -> RepoResult<Vec<JuryParticipation>> {
        let db = self.connections.open().await?;
        let rows = jury_participation::Entity::find()
            .order_by_asc(jury_participation::Column::JuryId)
            .order_by_asc(jury_participation::Column::ScreeningId)
            .all(&db)
            .await?;
        debug!(count = rows.len(), "loaded jury participations");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, key: &JuryParticipationKey) -> RepoResult<Option<JuryParticipation>> {
        let db = self.connections.open().await?;
        let row = jury_participation::Entity::find_by_id((key.jury_id, key.screening_id))
            .one(&db)
            .await?;
        Ok(row.map(to_record))
    }

    async fn add(&self, participation: &JuryParticipation) -> RepoResult<JuryParticipationKey> {
        let db = self.connections.open().await?;
        let row = jury_participation::ActiveModel {
            jury_id: Set(participation.jury_id),
            screening_id: Set(participation.screening_id),
            role: Set(participation.role.clone()),
            notes: Set(participation.notes.clone()),
        };
        jury_participation::Entity::insert(row).exec_without_returning(&db).await?;
        debug!(
            jury_id = participation.jury_id,
            screening_id = participation.screening_id,
            role = %participation.role,
            "inserted jury participation"
        );
        Ok(JuryParticipationKey {
            jury_id: participation.jury_id,
            screening_id: participation.screening_id,
        })
    }

    async fn update(&self, participation: &JuryParticipation) -> RepoResult<bool> {
        let db = self.connections.open().await?;
        let changes = jury_participation::ActiveModel {
            jury_id: NotSet,
            screening_id: NotSet,
            role: Set(participation.role.clone()),
            notes: Set(participation.notes.clone()),
        };
        let result = jury_participation::Entity::update_many()
            .set(changes)
            .filter(jury_participation::Column::JuryId.eq(participation.jury_id))
            .filter(jury_participation::Column::ScreeningId.eq(participation.screening_id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, keys: &[JuryParticipationKey]) -> RepoResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        jury_participation::Entity::delete_many()
            .filter(pair_condition(
                keys,
                jury_participation::Column::JuryId,
                jury_participation::Column::ScreeningId,
                |key| (key.jury_id, key.screening_id),
            ))
            .exec(&db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, check_crud, fixtures};

    #[tokio::test]
    async fn role_change_keeps_the_pair() {
        let db = TestDb::new().await;
        let jury_id = fixtures::stored_jury(&db, "Marta Díaz").await;
        let screening_id = fixtures::screening(&db).await;
        let repo = JuryParticipationRepository::new(db.provider());
        let key = repo
            .add(&JuryParticipation {
                jury_id,
                screening_id,
                role: "Evaluator".to_string(),
                notes: "No comments".to_string(),
            })
            .await
            .unwrap();

        let promoted = JuryParticipation {
            jury_id,
            screening_id,
            role: "Moderator".to_string(),
            notes: "Opening night".to_string(),
        };
        assert!(repo.update(&promoted).await.unwrap());
        assert_eq!(repo.get_by_id(&key).await.unwrap(), Some(promoted));
    }

    #[tokio::test]
    async fn crud_keeps_rows_apart() {
        let db = TestDb::new().await;
        let jury_id = fixtures::stored_jury(&db, "Marta Díaz").await;
        let first = fixtures::screening(&db).await;
        let second = fixtures::screening(&db).await;
        let seat = |screening_id| JuryParticipation {
            jury_id,
            screening_id,
            role: "Evaluator".to_string(),
            notes: String::new(),
        };
        let repo = JuryParticipationRepository::new(db.provider());
        check_crud(&repo, seat(first), seat(second), |p| JuryParticipation {
            role: "President".to_string(),
            ..p
        })
        .await;
    }
}
