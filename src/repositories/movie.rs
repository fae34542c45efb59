use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{
    db::ConnectionProvider,
    entities::movie,
    error::{RepoError, RepoResult},
    models::Movie,
};

pub struct MovieRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl MovieRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: movie::Model) -> Movie {
    Movie {
        id: Some(row.id),
        title: row.title,
        country: row.country,
        director: row.director,
        duration_minutes: row.duration_minutes,
        genre: row.genre,
        rating: row.rating,
        synopsis: row.synopsis,
    }
}

fn to_active(movie: &Movie) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        title: Set(movie.title.clone()),
        country: Set(movie.country.clone()),
        director: Set(movie.director.clone()),
        duration_minutes: Set(movie.duration_minutes),
        genre: Set(movie.genre.clone()),
        rating: Set(movie.rating.clone()),
        synopsis: Set(movie.synopsis.clone()),
    }
}

#[async_trait]
impl Repository for MovieRepository {
    type Record = Movie;

    async fn get_all(&self) -> RepoResult<Vec<Movie>> {
        let db = self.connections.open().await?;
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&db).await?;
        debug!(count = rows.len(), "loaded movies");
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn get_by_id(&self, id: &i32) -> RepoResult<Option<Movie>> {
        let db = self.connections.open().await?;
        Ok(movie::Entity::find_by_id(*id).one(&db).await?.map(to_record))
    }

    async fn add(&self, movie: &Movie) -> RepoResult<i32> {
        let db = self.connections.open().await?;
        let result = movie::Entity::insert(to_active(movie)).exec(&db).await?;
        debug!(id = result.last_insert_id, title = %movie.title, "inserted movie");
        Ok(result.last_insert_id)
    }

    async fn update(&self, movie: &Movie) -> RepoResult<bool> {
        let id = movie.id.ok_or(RepoError::MissingKey)?;
        let db = self.connections.open().await?;
        let result = movie::Entity::update_many()
            .set(to_active(movie))
            .filter(movie::Column::Id.eq(id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, ids: &[i32]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        let result = movie::Entity::delete_many()
            .filter(movie::Column::Id.is_in(ids.iter().copied()))
            .exec(&db)
            .await?;
        debug!(requested = ids.len(), deleted = result.rows_affected, "deleted movies");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, check_crud, fixtures};

    #[tokio::test]
    async fn batch_delete_removes_exactly_the_listed_movies() {
        let db = TestDb::new().await;
        let repo = MovieRepository::new(db.provider());
        let mut ids = Vec::new();
        for title in ["Machuca", "No", "Gloria", "Tony Manero", "Neruda"] {
            ids.push(repo.add(&fixtures::movie(title)).await.unwrap());
        }

        repo.delete_many(&ids[1..4]).await.unwrap();

        let titles: Vec<_> = repo.get_all().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Machuca", "Neruda"]);
    }

    #[tokio::test]
    async fn unknown_ids_are_ignored_by_delete() {
        let db = TestDb::new().await;
        let repo = MovieRepository::new(db.provider());
        let id = repo.add(&fixtures::movie("Machuca")).await.unwrap();

        repo.delete_many(&[id + 100]).await.unwrap();
        repo.delete_many(&[]).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_is_all_or_nothing() {
        let db = TestDb::new().await;
        let repo = MovieRepository::new(db.provider());
        let free = repo.add(&fixtures::movie("Machuca")).await.unwrap();
        let awarded = repo.add(&fixtures::movie("Gloria")).await.unwrap();
        fixtures::award(&db, awarded).await;

        let err = repo.delete_many(&[free, awarded]).await.unwrap_err();
        assert!(matches!(err, RepoError::ForeignKey(_)), "got {err:?}");
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn crud_keeps_rows_apart() {
        let db = TestDb::new().await;
        let repo = MovieRepository::new(db.provider());
        check_crud(&repo, fixtures::movie("Machuca"), fixtures::movie("No"), |movie| Movie {
            director: "Andrés Wood".to_string(),
            duration_minutes: 121,
            ..movie
        })
        .await;
    }
}
