use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::prelude::SchemaManager;
use tracing::{debug, warn};

use crate::config::{EvaluationTarget, SchemaSettings};

pub const EVALUATION_TABLE: &str = "evaluation";

const SUBJECT_CANDIDATES: [EvaluationSubject; 2] =
    [EvaluationSubject::Screening, EvaluationSubject::Movie];
const DATE_CANDIDATES: [&str; 3] = ["evaluation_date", "date", "recorded_on"];

/// What the second half of an evaluation key points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvaluationSubject {
    Movie,
    Screening,
}

impl EvaluationSubject {
    pub fn column(self) -> &'static str {
        match self {
            EvaluationSubject::Movie => "movie_id",
            EvaluationSubject::Screening => "screening_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EvaluationSubject::Movie => "Movie ID",
            EvaluationSubject::Screening => "Screening ID",
        }
    }
}

/// Column layout of the evaluation table in the connected database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationSchema {
    pub subject: EvaluationSubject,
    pub date_column: Option<String>,
}

impl Default for EvaluationSchema {
    fn default() -> Self {
        Self {
            subject: EvaluationSubject::Movie,
            date_column: Some(DATE_CANDIDATES[0].to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Choice<T> {
    Detect,
    Fixed(T),
}

fn date_choice(raw: &str) -> Choice<Option<String>> {
    match raw.trim() {
        "" | "auto" => Choice::Detect,
        "none" => Choice::Fixed(None),
        column => Choice::Fixed(Some(column.to_ascii_lowercase())),
    }
}

/// Resolves the evaluation layout once. Explicit settings win; `auto` looks the
/// columns up in the catalog.
pub async fn resolve(
    db: &DatabaseConnection,
    settings: &SchemaSettings,
) -> Result<EvaluationSchema, DbErr> {
    let manager = SchemaManager::new(db);

    let subject = match settings.evaluation_target {
        EvaluationTarget::Fixed(subject) => subject,
        EvaluationTarget::Auto => {
            let mut found = None;
            for candidate in SUBJECT_CANDIDATES {
                if manager.has_column(EVALUATION_TABLE, candidate.column()).await? {
                    found = Some(candidate);
                    break;
                }
            }
            found.unwrap_or_else(|| {
                warn!("no evaluation subject column found, assuming movie_id");
                EvaluationSubject::Movie
            })
        },
    };

    let date_column = match date_choice(&settings.evaluation_date_column) {
        Choice::Fixed(column) => column,
        Choice::Detect => {
            let mut found = None;
            for candidate in DATE_CANDIDATES {
                if manager.has_column(EVALUATION_TABLE, candidate).await? {
                    found = Some(candidate.to_string());
                    break;
                }
            }
            if found.is_none() {
                debug!("evaluation table has no date column");
            }
            found
        },
    };

    Ok(EvaluationSchema { subject, date_column })
}
