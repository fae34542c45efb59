//! Data access. One repository per table; each call opens its own session and
//! commits its single statement before returning.

use async_trait::async_trait;
use jiff::civil::Date;
use sea_orm::{ColumnTrait, Condition};

use crate::{
    error::{RepoError, RepoResult},
    models::Keyed,
};

mod attendance;
mod attendee;
mod award;
mod city;
mod evaluation;
mod jury;
mod jury_participation;
mod movie;
mod projection;
mod screening;
mod venue;

pub use attendance::AttendanceRepository;
pub use attendee::AttendeeRepository;
pub use award::AwardRepository;
pub use city::CityRepository;
pub use evaluation::EvaluationRepository;
pub use jury::JuryRepository;
pub use jury_participation::JuryParticipationRepository;
pub use movie::MovieRepository;
pub use projection::ProjectionRepository;
pub use screening::ScreeningRepository;
pub use venue::VenueRepository;

pub type KeyOf<R> = <<R as Repository>::Record as Keyed>::Key;

#[async_trait]
pub trait Repository: Send + Sync {
    type Record: Keyed + Clone + Send + Sync + 'static;

    /// Every row in the table's display order. Empty when the table is empty.
    async fn get_all(&self) -> RepoResult<Vec<Self::Record>>;

    async fn get_by_id(&self, key: &KeyOf<Self>) -> RepoResult<Option<Self::Record>>;

    /// Inserts the record and returns the key the row was stored under.
    async fn add(&self, record: &Self::Record) -> RepoResult<KeyOf<Self>>;

    /// Rewrites every non-key column. `Ok(false)` when no row has that key.
    async fn update(&self, record: &Self::Record) -> RepoResult<bool>;

    /// Removes all listed rows in one statement: either all of them go or none.
    async fn delete_many(&self, keys: &[KeyOf<Self>]) -> RepoResult<()>;
}

pub(crate) fn parse_date(raw: &str) -> RepoResult<Date> {
    raw.trim().parse().map_err(|err: jiff::Error| RepoError::Decode(format!("{raw:?}: {err}")))
}

pub(crate) fn parse_optional_date(raw: Option<String>) -> RepoResult<Option<Date>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

/// `(a = x1 AND b = y1) OR (a = x2 AND b = y2) ...` for composite keys.
pub(crate) fn pair_condition<C, K>(
    keys: &[K],
    left: C,
    right: C,
    split: impl Fn(&K) -> (i32, i32),
) -> Condition
where
    C: ColumnTrait,
{
    keys.iter().fold(Condition::any(), |cond, key| {
        let (a, b) = split(key);
        cond.add(Condition::all().add(left.eq(a)).add(right.eq(b)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_from_iso_text() {
        assert_eq!(parse_date("2025-03-14").unwrap(), jiff::civil::date(2025, 3, 14));
        assert!(matches!(parse_date("14/03/2025"), Err(RepoError::Decode(_))));
        assert_eq!(parse_optional_date(Some(" ".to_string())).unwrap(), None);
        assert_eq!(parse_optional_date(None).unwrap(), None);
    }
}
