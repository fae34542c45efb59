use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{
    db::ConnectionProvider,
    entities::attendee,
    error::{RepoError, RepoResult},
    models::Attendee,
};

pub struct AttendeeRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl AttendeeRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: attendee::Model) -> Attendee {
    Attendee {
        id: Some(row.id),
        name: row.name,
        email: row.email,
        phone: row.phone,
        age: row.age,
        city: row.city,
        attendee_type: row.attendee_type,
    }
}

fn to_active(attendee: &Attendee) -> attendee::ActiveModel {
    attendee::ActiveModel {
        id: NotSet,
        name: Set(attendee.name.clone()),
        email: Set(attendee.email.clone()),
        phone: Set(attendee.phone.clone()),
        age: Set(attendee.age),
        city: Set(attendee.city.clone()),
        attendee_type: Set(attendee.attendee_type.clone()),
    }
}

#[async_trait]
impl Repository for AttendeeRepository {
    type Record = Attendee;

    async fn get_all(&self) -> RepoResult<Vec<Attendee>> {
        let db = self.connections.open().await?;
        let rows = attendee::Entity::find().order_by_asc(attendee::Column::Id).all(&db).await?;
        debug!(count = rows.len(), "loaded attendees");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<Attendee>> {
        let db = self.connections.open().await?;
        Ok(attendee::Entity::find_by_id(*id).one(&db).await?.map(to_record))
    }

    async fn add(&self, attendee: &Attendee) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = attendee::Entity::insert(to_active(attendee)).exec(&db).await?;
        debug!(id = result.last_insert_id, "inserted attendee");
        Ok(result.last_insert_id)
    }

    async fn update(&self, attendee: &Attendee) -> RepoResult<bool> {
        let id = attendee.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = attendee::Entity::update_many()
            .set(to_active(attendee))
            .filter(attendee::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        attendee::Entity::delete_many()
            .filter(attendee::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, check_crud};

    #[tokio::test]
    async fn age_is_optional() {
        let db = TestDb::new().await;
        let repo = AttendeeRepository::new(db.provider());
        let attendee = Attendee {
            id: None,
            name: "Luis Soto".to_string(),
            email: "luis@example.com".to_string(),
            phone: "+56 9 1234 5678".to_string(),
            age: None,
            city: "Concepción".to_string(),
            attendee_type: "Student".to_string(),
        };

        let id = repo.add(&attendee).await.unwrap();
        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.age, None);
        assert_eq!(stored.city, "Concepción");

        assert!(repo.update(&Attendee { id: Some(id), age: Some(22), ..stored }).await.unwrap());
        assert_eq!(repo.get_by_id(&id).await.unwrap().unwrap().age, Some(22));
    }

    #[tokio::test]
    async fn crud_keeps_rows_apart() {
        let db = TestDb::new().await;
        let ana = Attendee {
            id: None,
            name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            phone: String::new(),
            age: Some(31),
            city: "Santiago".to_string(),
            attendee_type: "General".to_string(),
        };
        let luis = Attendee {
            name: "Luis Soto".to_string(),
            email: "luis@example.com".to_string(),
            age: None,
            ..ana.clone()
        };
        check_crud(&AttendeeRepository::new(db.provider()), ana, luis, |a| Attendee {
            phone: "+56 9 8765 4321".to_string(),
            attendee_type: "VIP".to_string(),
            ..a
        })
        .await;
    }
}
