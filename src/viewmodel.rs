use tokio::sync::broadcast;
use tracing::warn;

use crate::repositories::{KeyOf, Repository};

const EVENT_CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent<T> {
    /// The cache was replaced by this collection.
    Changed(Vec<T>),
    Error(String),
}

/// Caches one table and tells subscribers when the cache changes or an
/// operation fails. A failed operation never touches the cache.
pub struct ViewModel<R: Repository> {
    repository: R,
    records: Vec<R::Record>,
    events: broadcast::Sender<ViewEvent<R::Record>>,
}

impl<R: Repository> ViewModel<R> {
    pub fn new(repository: R) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { repository, records: Vec::new(), events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent<R::Record>> {
        self.events.subscribe()
    }

    /// Snapshot from the last successful load.
    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub async fn load(&mut self) -> bool {
        match self.repository.get_all().await {
            Ok(records) => {
                self.records = records;
                self.publish(ViewEvent::Changed(self.records.clone()));
                true
            },
            Err(err) => self.fail(err.to_string()),
        }
    }

    /// The stored version of one record, bypassing the cache.
    pub async fn fetch(&self, key: &KeyOf<R>) -> Option<R::Record> {
        match self.repository.get_by_id(key).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                self.fail("the record no longer exists".to_string());
                None
            },
            Err(err) => {
                self.fail(err.to_string());
                None
            },
        }
    }

    pub async fn add(&mut self, record: &R::Record) -> bool {
        match self.repository.add(record).await {
            Ok(_) => self.load().await,
            Err(err) => self.fail(err.to_string()),
        }
    }

    pub async fn update(&mut self, record: &R::Record) -> bool {
        match self.repository.update(record).await {
            Ok(true) => self.load().await,
            Ok(false) => self.fail("no matching record".to_string()),
            Err(err) => self.fail(err.to_string()),
        }
    }

    pub async fn delete(&mut self, keys: &[KeyOf<R>]) -> bool {
        match self.repository.delete_many(keys).await {
            Ok(()) => self.load().await,
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&self, message: String) -> bool {
        warn!(error = %message, "operation failed");
        self.publish(ViewEvent::Error(message));
        false
    }

    fn publish(&self, event: ViewEvent<R::Record>) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{City, Venue},
        repositories::{CityRepository, MovieRepository, VenueRepository},
        testing::{TestDb, fixtures},
    };

    fn theatre(city_id: i32) -> Venue {
        Venue {
            id: None,
            name: "Teatro Biobío".to_string(),
            address: "Av. Pedro de Valdivia 1450".to_string(),
            capacity: 1200,
            venue_type: "Amphitheatre".to_string(),
            city_id,
            status: "Active".to_string(),
        }
    }

    #[tokio::test]
    async fn loading_twice_yields_identical_snapshots() {
        let db = TestDb::new().await;
        let mut vm = ViewModel::new(MovieRepository::new(db.provider()));
        vm.add(&fixtures::movie("Machuca")).await;
        vm.add(&fixtures::movie("No")).await;

        assert!(vm.load().await);
        let first = vm.records().to_vec();
        assert!(vm.load().await);
        assert_eq!(vm.records(), first.as_slice());
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn add_reloads_and_notifies() {
        let db = TestDb::new().await;
        let mut vm = ViewModel::new(CityRepository::new(db.provider()));
        let mut events = vm.subscribe();

        let city = City {
            id: None,
            name: "Valdivia".to_string(),
            region: "Los Ríos".to_string(),
            country: "Chile".to_string(),
            notes: String::new(),
        };
        assert!(vm.add(&city).await);

        match events.recv().await.unwrap() {
            ViewEvent::Changed(records) => {
                assert_eq!(records.len(), 1);
                assert!(records[0].id.is_some());
                assert_eq!(records[0].name, "Valdivia");
            },
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(vm.records().len(), 1);
    }

    #[tokio::test]
    async fn rejected_insert_leaves_cache_untouched() {
        let db = TestDb::new().await;
        let city_id = fixtures::city(&db).await;
        let mut vm = ViewModel::new(VenueRepository::new(db.provider()));
        assert!(vm.add(&theatre(city_id)).await);
        let mut events = vm.subscribe();

        assert!(!vm.add(&theatre(city_id + 50)).await);

        assert!(matches!(events.recv().await.unwrap(), ViewEvent::Error(_)));
        assert_eq!(vm.records().len(), 1);
        assert_eq!(vm.records()[0].city_id, city_id);
    }

    #[tokio::test]
    async fn update_without_match_is_reported() {
        let db = TestDb::new().await;
        let mut vm = ViewModel::new(CityRepository::new(db.provider()));
        let mut events = vm.subscribe();
        let ghost = City {
            id: Some(77),
            name: "Arica".to_string(),
            region: "Arica y Parinacota".to_string(),
            country: "Chile".to_string(),
            notes: String::new(),
        };

        assert!(!vm.update(&ghost).await);
        let event = events.recv().await.unwrap();
        assert_eq!(event, ViewEvent::Error("no matching record".to_string()));
    }

    #[tokio::test]
    async fn fetch_reads_the_stored_row() {
        let db = TestDb::new().await;
        let mut vm = ViewModel::new(MovieRepository::new(db.provider()));
        assert!(vm.add(&fixtures::movie("Machuca")).await);
        let id = vm.records()[0].id.unwrap();
        let mut events = vm.subscribe();

        assert_eq!(vm.fetch(&id).await.map(|m| m.title), Some("Machuca".to_string()));
        assert_eq!(vm.fetch(&(id + 1)).await, None);
        let event = events.recv().await.unwrap();
        assert_eq!(event, ViewEvent::Error("the record no longer exists".to_string()));
    }

    #[tokio::test]
    async fn deleting_three_movies_leaves_the_rest() {
        let db = TestDb::new().await;
        let mut vm = ViewModel::new(MovieRepository::new(db.provider()));
        for title in ["Machuca", "No", "Gloria", "Neruda", "Jackie", "Ema"] {
            assert!(vm.add(&fixtures::movie(title)).await);
        }
        let doomed: Vec<i32> = vm.records()[1..4].iter().filter_map(|m| m.id).collect();
        let doomed_titles: Vec<String> =
            vm.records()[1..4].iter().map(|m| m.title.clone()).collect();

        assert!(vm.delete(&doomed).await);

        assert_eq!(vm.records().len(), 3);
        assert!(vm.records().iter().all(|m| !doomed_titles.contains(&m.title)));
    }
}
