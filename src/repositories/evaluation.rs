//! Evaluations are the one table whose layout differs between deployments, so
//! statements are assembled at run time from the resolved [`EvaluationSchema`].

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DbErr, QueryResult,
    sea_query::{Alias, Condition, Expr, Order, Query, SimpleExpr},
};
use tracing::debug;

use super::{Repository, parse_optional_date};
use crate::{
    db::ConnectionProvider,
    error::RepoResult,
    models::{Evaluation, EvaluationKey},
    schema::{EVALUATION_TABLE, EvaluationSchema},
};

const JURY_ID: &str = "jury_id";
const SCORE: &str = "score";
const COMMENT: &str = "comment";
const CATEGORY: &str = "category";

pub struct EvaluationRepository {
    connections: Arc<dyn ConnectionProvider>,
    schema: EvaluationSchema,
}

impl EvaluationRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>, schema: EvaluationSchema) -> Self {
        Self { connections, schema }
    }

    fn subject(&self) -> &'static str {
        self.schema.subject.column()
    }

    /// Selected columns in row order; the date is present only when the table has one.
    fn columns(&self) -> Vec<Alias> {
        let mut columns = vec![
            Alias::new(JURY_ID),
            Alias::new(self.subject()),
            Alias::new(SCORE),
            Alias::new(COMMENT),
            Alias::new(CATEGORY),
        ];
        if let Some(date) = &self.schema.date_column {
            columns.push(Alias::new(date));
        }
        columns
    }

    fn key_condition(&self, key: &EvaluationKey) -> Condition {
        Condition::all()
            .add(Expr::col(Alias::new(JURY_ID)).eq(key.jury_id))
            .add(Expr::col(Alias::new(self.subject())).eq(key.subject_id))
    }

    /// Non-key columns with their new values.
    fn payload(&self, evaluation: &Evaluation) -> Vec<(Alias, SimpleExpr)> {
        let mut values = vec![
            (Alias::new(SCORE), evaluation.score.into()),
            (Alias::new(COMMENT), evaluation.comment.clone().into()),
            (Alias::new(CATEGORY), evaluation.category.clone().into()),
        ];
        if let Some(date) = &self.schema.date_column {
            values.push((Alias::new(date), evaluation.date.map(|d| d.to_string()).into()));
        }
        values
    }

    fn to_record(&self, row: QueryResult) -> RepoResult<Evaluation> {
        let date = match &self.schema.date_column {
            Some(column) => parse_optional_date(row.try_get::<Option<String>>("", column)?)?,
            None => None,
        };
        Ok(Evaluation {
            jury_id: row.try_get("", JURY_ID)?,
            subject_id: row.try_get("", self.subject())?,
            score: row.try_get("", SCORE)?,
            comment: row.try_get("", COMMENT)?,
            date,
            category: row.try_get("", CATEGORY)?,
        })
    }
}

#[async_trait]
impl Repository for EvaluationRepository {
    type Record = Evaluation;

    async fn get_all(&self) -> RepoResult<Vec<Evaluation>> {
        let db = self.connections.open().await?;
        let query = Query::select()
            .columns(self.columns())
            .from(Alias::new(EVALUATION_TABLE))
            .order_by(Alias::new(JURY_ID), Order::Asc)
            .order_by(Alias::new(self.subject()), Order::Asc)
            .to_owned();
        let rows = db.query_all(db.get_database_backend().build(&query)).await?;
        debug!(count = rows.len(), subject = self.subject(), "loaded evaluations");
        rows.into_iter().map(|row| self.to_record(row)).collect()
    }

    async fn get_by_id(&self, key: &EvaluationKey) -> RepoResult<Option<Evaluation>> {
        let db = self.connections.open().await?;
        let query = Query::select()
            .columns(self.columns())
            .from(Alias::new(EVALUATION_TABLE))
            .cond_where(self.key_condition(key))
            .to_owned();
        let row = db.query_one(db.get_database_backend().build(&query)).await?;
        row.map(|row| self.to_record(row)).transpose()
    }

    async fn add(&self, evaluation: &Evaluation) -> RepoResult<EvaluationKey> {
        let db = self.connections.open().await?;
        let (columns, mut values): (Vec<_>, Vec<_>) = self.payload(evaluation).into_iter().unzip();
        values.splice(0..0, [evaluation.jury_id.into(), evaluation.subject_id.into()]);
        let columns = [Alias::new(JURY_ID), Alias::new(self.subject())].into_iter().chain(columns);

        let insert = Query::insert()
            .into_table(Alias::new(EVALUATION_TABLE))
            .columns(columns)
            .values(values)
            .map_err(|err| DbErr::Custom(err.to_string()))?
            .to_owned();
        db.execute(db.get_database_backend().build(&insert)).await?;
        debug!(
            jury_id = evaluation.jury_id,
            subject_id = evaluation.subject_id,
            score = evaluation.score,
            "inserted evaluation"
        );
        Ok(EvaluationKey { jury_id: evaluation.jury_id, subject_id: evaluation.subject_id })
    }

    async fn update(&self, evaluation: &Evaluation) -> RepoResult<bool> {
        let db = self.connections.open().await?;
        let key = EvaluationKey { jury_id: evaluation.jury_id, subject_id: evaluation.subject_id };
        let update = Query::update()
            .table(Alias::new(EVALUATION_TABLE))
            .values(self.payload(evaluation))
            .cond_where(self.key_condition(&key))
            .to_owned();
        let result = db.execute(db.get_database_backend().build(&update)).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, keys: &[EvaluationKey]) -> RepoResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        let condition = keys
            .iter()
            .fold(Condition::any(), |cond, key| cond.add(self.key_condition(key)));
        let delete = Query::delete()
            .from_table(Alias::new(EVALUATION_TABLE))
            .cond_where(condition)
            .to_owned();
        db.execute(db.get_database_backend().build(&delete)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use sea_orm::{DatabaseBackend, Statement};

    use super::*;
    use crate::{
        error::RepoError,
        repositories::MovieRepository,
        schema::EvaluationSubject,
        testing::{TestDb, check_crud, fixtures},
    };

    fn evaluation(jury_id: i32, subject_id: i32, score: i32) -> Evaluation {
        Evaluation {
            jury_id,
            subject_id,
            score,
            comment: String::new(),
            date: Some(date(2025, 3, 15)),
            category: "General".to_string(),
        }
    }

    #[tokio::test]
    async fn movie_variant_keeps_the_date() {
        let db = TestDb::new().await;
        let jury_id = fixtures::stored_jury(&db, "Marta Díaz").await;
        let movie_id =
            MovieRepository::new(db.provider()).add(&fixtures::movie("Machuca")).await.unwrap();
        let repo = EvaluationRepository::new(db.provider(), db.schema.clone());

        let key = repo.add(&evaluation(jury_id, movie_id, 8)).await.unwrap();
        assert_eq!(repo.get_by_id(&key).await.unwrap(), Some(evaluation(jury_id, movie_id, 8)));

        let rescored = Evaluation {
            score: 9,
            category: "Directing".to_string(),
            ..evaluation(jury_id, movie_id, 8)
        };
        assert!(repo.update(&rescored).await.unwrap());
        assert_eq!(repo.get_all().await.unwrap(), vec![rescored]);

        let err = repo.add(&evaluation(jury_id, movie_id, 3)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn screening_variant_without_date_column() {
        let db = TestDb::empty().await;
        let conn = db.provider().open().await.unwrap();
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE TABLE evaluation (jury_id INTEGER NOT NULL, screening_id INTEGER NOT NULL, \
             score INTEGER NOT NULL, comment TEXT NOT NULL, category TEXT NOT NULL, \
             PRIMARY KEY (jury_id, screening_id))"
                .to_string(),
        ))
        .await
        .unwrap();
        drop(conn);
        let schema = EvaluationSchema { subject: EvaluationSubject::Screening, date_column: None };
        let repo = EvaluationRepository::new(db.provider(), schema);

        for (screening_id, score) in [(7, 6), (3, 10), (5, 4)] {
            repo.add(&evaluation(1, screening_id, score)).await.unwrap();
        }

        let stored = repo.get_all().await.unwrap();
        let subjects: Vec<_> = stored.iter().map(|e| e.subject_id).collect();
        assert_eq!(subjects, vec![3, 5, 7]);
        assert!(stored.iter().all(|e| e.date.is_none()));

        repo.delete_many(&[
            EvaluationKey { jury_id: 1, subject_id: 3 },
            EvaluationKey { jury_id: 1, subject_id: 7 },
        ])
        .await
        .unwrap();
        let left = repo.get_all().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].score, 4);
    }

    #[tokio::test]
    async fn update_of_unknown_pair_reports_no_match() {
        let db = TestDb::new().await;
        let repo = EvaluationRepository::new(db.provider(), db.schema.clone());

        assert!(!repo.update(&evaluation(1, 1, 5)).await.unwrap());
        let key = EvaluationKey { jury_id: 1, subject_id: 1 };
        assert_eq!(repo.get_by_id(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn crud_keeps_rows_apart() {
        let db = TestDb::new().await;
        let jury_id = fixtures::stored_jury(&db, "Marta Díaz").await;
        let movies = MovieRepository::new(db.provider());
        let first = movies.add(&fixtures::movie("Machuca")).await.unwrap();
        let second = movies.add(&fixtures::movie("No")).await.unwrap();
        let repo = EvaluationRepository::new(db.provider(), db.schema.clone());
        check_crud(
            &repo,
            evaluation(jury_id, first, 7),
            evaluation(jury_id, second, 5),
            |e| Evaluation { score: 9, comment: "Strong ending".to_string(), ..e },
        )
        .await;
    }
}
