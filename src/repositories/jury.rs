use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{
    db::ConnectionProvider,
    entities::jury,
    error::{RepoError, RepoResult},
    models::Jury,
};

pub struct JuryRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl JuryRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: jury::Model) -> Jury {
    Jury {
        id: Some(row.id),
        name: row.name,
        email: row.email,
        specialty: row.specialty,
        country: row.country,
        years_experience: row.years_experience,
        jury_type: row.jury_type,
        bio: row.bio,
    }
}

fn to_active(jury: &Jury) -> jury::ActiveModel {
    jury::ActiveModel {
        id: NotSet,
        name: Set(jury.name.clone()),
        email: Set(jury.email.clone()),
        specialty: Set(jury.specialty.clone()),
        country: Set(jury.country.clone()),
        years_experience: Set(jury.years_experience),
        jury_type: Set(jury.jury_type.clone()),
        bio: Set(jury.bio.clone()),
    }
}

#[async_trait]
impl Repository for JuryRepository {
    type Record = Jury;

    async fn get_all(&self) -> RepoResult<Vec<Jury>> {
        let db = self.connections.open().await?;
        let rows = jury::Entity::find().order_by_asc(jury::Column::Id).all(&db).await?;
        debug!(count = rows.len(), "loaded jury members");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<Jury>> {
        let db = self.connections.open().await?;
        Ok(jury::Entity::find_by_id(*id).one(&db).await?.map(to_record))
    }

    async fn add(&self, jury: &Jury) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = jury::Entity::insert(to_active(jury)).exec(&db).await?;
        debug!(id = result.last_insert_id, "inserted jury member");
        Ok(result.last_insert_id)
    }

    async fn update(&self, jury: &Jury) -> RepoResult<bool> {
        let id = jury.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = jury::Entity::update_many()
            .set(to_active(jury))
            .filter(jury::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Participations of the removed members go with them.
    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        jury::Entity::delete_many()
            .filter(jury::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{JuryParticipation, JuryParticipationKey},
        repositories::JuryParticipationRepository,
        testing::{TestDb, check_crud, fixtures},
    };

    #[tokio::test]
    async fn deleting_a_member_removes_their_participations() {
        let db = TestDb::new().await;
        let screening_id = fixtures::screening(&db).await;
        let jury = JuryRepository::new(db.provider());
        let id = jury.add(&fixtures::jury("Marta Díaz")).await.unwrap();
        let participations = JuryParticipationRepository::new(db.provider());
        participations
            .add(&JuryParticipation {
                jury_id: id,
                screening_id,
                role: "President".to_string(),
                notes: String::new(),
            })
            .await
            .unwrap();

        jury.delete_many(&[id]).await.unwrap();

        let key = JuryParticipationKey { jury_id: id, screening_id };
        assert_eq!(participations.get_by_id(&key).await.unwrap(), None);
        assert!(participations.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn crud_keeps_rows_apart() {
        let db = TestDb::new().await;
        let repo = JuryRepository::new(db.provider());
        let first = fixtures::jury("Marta Díaz");
        let second = fixtures::jury("Jorge Ríos");
        check_crud(&repo, first, second, |jury| Jury {
            years_experience: 15,
            bio: "Documentary editor".to_string(),
            ..jury
        })
        .await;
    }
}
