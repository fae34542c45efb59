use std::{fmt::Debug, hash::Hash};

use jiff::civil::Date;

/// Records that can be addressed by a key once persisted.
pub trait Keyed {
    type Key: Clone + Debug + Eq + Hash + Send + Sync + 'static;

    /// `None` for surrogate-keyed records that were never saved.
    fn key(&self) -> Option<Self::Key>;

    /// The same record stored under `key`.
    fn with_key(self, key: Self::Key) -> Self;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct City {
    pub id: Option<i32>,
    pub name: String,
    pub region: String,
    pub country: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Venue {
    pub id: Option<i32>,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub venue_type: String,
    pub city_id: i32,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub id: Option<i32>,
    pub title: String,
    pub country: String,
    pub director: String,
    pub duration_minutes: i32,
    pub genre: String,
    pub rating: String,
    pub synopsis: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Screening {
    pub id: Option<i32>,
    pub date: Date,
    /// `HH:MM`
    pub time: String,
    pub ticket_price: f64,
    pub status: String,
    pub notes: String,
    pub venue_id: i32,
}

/// A movie shown as part of a screening, in running order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub screening_id: i32,
    pub movie_id: i32,
    pub position: i32,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectionKey {
    pub screening_id: i32,
    pub movie_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendee {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: Option<i32>,
    pub city: String,
    pub attendee_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendance {
    pub screening_id: i32,
    pub attendee_id: i32,
    pub tickets: i32,
    pub purchase_date: Date,
    pub payment_method: String,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttendanceKey {
    pub screening_id: i32,
    pub attendee_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jury {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub country: String,
    pub years_experience: i32,
    pub jury_type: String,
    pub bio: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JuryParticipation {
    pub jury_id: i32,
    pub screening_id: i32,
    pub role: String,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JuryParticipationKey {
    pub jury_id: i32,
    pub screening_id: i32,
}

/// A jury member's score. `subject_id` is a movie or a screening depending on
/// the deployed schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub jury_id: i32,
    pub subject_id: i32,
    pub score: i32,
    pub comment: String,
    pub date: Option<Date>,
    pub category: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvaluationKey {
    pub jury_id: i32,
    pub subject_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Award {
    pub id: Option<i32>,
    pub movie_id: i32,
    pub category: String,
    pub edition: i32,
    pub rank: i32,
    pub description: String,
    pub award_date: Option<Date>,
}

macro_rules! surrogate_key {
    ($($record:ty),* $(,)?) => {
        $(
            impl Keyed for $record {
                type Key = i32;

                fn key(&self) -> Option<i32> {
                    self.id
                }

                fn with_key(self, id: i32) -> Self {
                    Self { id: Some(id), ..self }
                }
            }
        )*
    };
}

surrogate_key!(City, Venue, Movie, Screening, Attendee, Jury, Award);

impl Keyed for Projection {
    type Key = ProjectionKey;

    fn key(&self) -> Option<ProjectionKey> {
        Some(ProjectionKey { screening_id: self.screening_id, movie_id: self.movie_id })
    }

    fn with_key(self, key: ProjectionKey) -> Self {
        Self { screening_id: key.screening_id, movie_id: key.movie_id, ..self }
    }
}

impl Keyed for Attendance {
    type Key = AttendanceKey;

    fn key(&self) -> Option<AttendanceKey> {
        Some(AttendanceKey { screening_id: self.screening_id, attendee_id: self.attendee_id })
    }

    fn with_key(self, key: AttendanceKey) -> Self {
        Self { screening_id: key.screening_id, attendee_id: key.attendee_id, ..self }
    }
}

impl Keyed for JuryParticipation {
    type Key = JuryParticipationKey;

    fn key(&self) -> Option<JuryParticipationKey> {
        Some(JuryParticipationKey { jury_id: self.jury_id, screening_id: self.screening_id })
    }

    fn with_key(self, key: JuryParticipationKey) -> Self {
        Self { jury_id: key.jury_id, screening_id: key.screening_id, ..self }
    }
}

impl Keyed for Evaluation {
    type Key = EvaluationKey;

    fn key(&self) -> Option<EvaluationKey> {
        Some(EvaluationKey { jury_id: self.jury_id, subject_id: self.subject_id })
    }

    fn with_key(self, key: EvaluationKey) -> Self {
        Self { jury_id: key.jury_id, subject_id: key.subject_id, ..self }
    }
}
