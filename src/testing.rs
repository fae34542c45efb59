//! Throwaway SQLite databases for tests.

use std::{fmt::Debug, sync::Arc};

use tempfile::TempDir;

use crate::{
    config::Settings,
    db::{self, ConnectionProvider, DatabaseProvider},
    models::Keyed,
    repositories::Repository,
    schema::EvaluationSchema,
};

pub struct TestDb {
    // keeps the database file alive
    _dir: TempDir,
    provider: Arc<dyn ConnectionProvider>,
    pub schema: EvaluationSchema,
}

impl TestDb {
    /// A fully migrated database.
    pub async fn new() -> Self {
        let mut settings = Settings::default();
        settings.database.migrate = true;
        Self::with_settings(settings).await
    }

    /// A database file with no tables at all.
    pub async fn empty() -> Self {
        let (dir, provider) = Self::file();
        Self { _dir: dir, provider, schema: EvaluationSchema::default() }
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let (dir, provider) = Self::file();
        let schema = db::prepare(provider.as_ref(), &settings).await.unwrap();
        Self { _dir: dir, provider, schema }
    }

    pub fn provider(&self) -> Arc<dyn ConnectionProvider> {
        self.provider.clone()
    }

    fn file() -> (TempDir, Arc<dyn ConnectionProvider>) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("festival.db").display());
        (dir, Arc::new(DatabaseProvider::new(url)))
    }
}

/// Runs the behaviour every repository shares against two fresh records:
/// both come back from `get_all`, `edit` changes only the first one, and
/// deleting the first leaves the second in place.
pub async fn check_crud<R>(
    repo: &R,
    first: R::Record,
    second: R::Record,
    edit: impl FnOnce(R::Record) -> R::Record,
) where
    R: Repository,
    R::Record: PartialEq + Debug,
{
    let first_key = repo.add(&first).await.unwrap();
    let second_key = repo.add(&second).await.unwrap();
    let first = first.with_key(first_key.clone());
    let second = second.with_key(second_key.clone());

    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 2, "{all:?}");
    assert!(all.contains(&first), "{first:?} missing from {all:?}");
    assert!(all.contains(&second), "{second:?} missing from {all:?}");

    let edited = edit(first.clone());
    assert_ne!(edited, first, "the edit changes nothing");
    assert!(repo.update(&edited).await.unwrap());
    assert_eq!(repo.get_by_id(&first_key).await.unwrap(), Some(edited));
    assert_eq!(repo.get_by_id(&second_key).await.unwrap(), Some(second.clone()));

    repo.delete_many(&[first_key.clone()]).await.unwrap();
    assert_eq!(repo.get_by_id(&first_key).await.unwrap(), None);
    assert_eq!(repo.get_all().await.unwrap(), vec![second]);
}

/// Parent rows most tests need before they can insert what they care about.
pub mod fixtures {
    use jiff::civil::date;

    use super::TestDb;
    use crate::{
        models::{Attendee, Award, City, Jury, Movie, Screening, Venue},
        repositories::{
            AttendeeRepository, AwardRepository, CityRepository, JuryRepository, Repository,
            ScreeningRepository, VenueRepository,
        },
    };

    pub fn movie(title: &str) -> Movie {
        Movie {
            id: None,
            title: title.to_string(),
            country: "Chile".to_string(),
            director: "Pablo Larraín".to_string(),
            duration_minutes: 110,
            genre: "Drama".to_string(),
            rating: "PG-13".to_string(),
            synopsis: String::new(),
        }
    }

    pub fn jury(name: &str) -> Jury {
        Jury {
            id: None,
            name: name.to_string(),
            email: format!("{}@festival.cl", name.to_lowercase().replace(' ', ".")),
            specialty: "Direction".to_string(),
            country: "Chile".to_string(),
            years_experience: 12,
            jury_type: "Professional".to_string(),
            bio: String::new(),
        }
    }

    pub async fn city(db: &TestDb) -> i32 {
        let city = City {
            id: None,
            name: "Santiago".to_string(),
            region: "Metropolitana".to_string(),
            country: "Chile".to_string(),
            notes: String::new(),
        };
        CityRepository::new(db.provider()).add(&city).await.unwrap()
    }

    pub async fn venue(db: &TestDb) -> i32 {
        let city_id = city(db).await;
        let venue = Venue {
            id: None,
            name: "Cine Arte Alameda".to_string(),
            address: "Av. Libertador Bernardo O'Higgins 139".to_string(),
            capacity: 300,
            venue_type: "Cinema".to_string(),
            city_id,
            status: "Active".to_string(),
        };
        VenueRepository::new(db.provider()).add(&venue).await.unwrap()
    }

    pub async fn screening(db: &TestDb) -> i32 {
        let venue_id = venue(db).await;
        let screening = Screening {
            id: None,
            date: date(2025, 3, 14),
            time: "19:30".to_string(),
            ticket_price: 5000.0,
            status: "Scheduled".to_string(),
            notes: String::new(),
            venue_id,
        };
        ScreeningRepository::new(db.provider()).add(&screening).await.unwrap()
    }

    pub async fn attendee(db: &TestDb) -> i32 {
        let attendee = Attendee {
            id: None,
            name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            phone: String::new(),
            age: Some(31),
            city: "Santiago".to_string(),
            attendee_type: "General".to_string(),
        };
        AttendeeRepository::new(db.provider()).add(&attendee).await.unwrap()
    }

    pub async fn award(db: &TestDb, movie_id: i32) -> i32 {
        let award = Award {
            id: None,
            movie_id,
            category: "Best Film".to_string(),
            edition: 2025,
            rank: 1,
            description: String::new(),
            award_date: None,
        };
        AwardRepository::new(db.provider()).add(&award).await.unwrap()
    }

    pub async fn stored_jury(db: &TestDb, name: &str) -> i32 {
        JuryRepository::new(db.provider()).add(&jury(name)).await.unwrap()
    }
}
