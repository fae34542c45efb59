use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::{
    error::ValidationError,
    forms::{FieldSpec, FormInput, FormValues},
    models::Keyed,
    registry::EntityKind,
    repositories::{KeyOf, Repository},
    table::{Cell, Role, TableAdapter, TableRow},
    viewmodel::{ViewEvent, ViewModel},
};

/// One rendered grid row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelRow {
    pub cells: Vec<String>,
    pub checked: bool,
    pub selectable: bool,
}

/// Drives one entity's view-model and table without the caller knowing the
/// record type.
#[async_trait]
pub trait EntityPanel: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Data column headers, without the select and detail columns.
    fn headers(&self) -> Vec<&'static str>;

    fn rows(&self) -> Vec<PanelRow>;

    fn form_fields(&self) -> Vec<FieldSpec>;

    async fn load(&mut self) -> bool;

    /// `Err` when the input is invalid and nothing was sent to the database.
    async fn create(&mut self, values: &FormValues) -> Result<bool, ValidationError>;

    /// Form fields that cannot change while editing.
    fn locked_fields(&self) -> &'static [&'static str];

    /// Remembers which record is being edited and returns its stored values.
    async fn begin_edit(&mut self, row: usize) -> Option<FormValues>;

    /// Writes the form over the record chosen by `begin_edit`. `Ok(false)` when
    /// nothing was being edited or the database refused.
    async fn save_edit(&mut self, values: &FormValues) -> Result<bool, ValidationError>;

    fn toggle(&mut self, row: usize) -> bool;

    /// Freezes the current selection as the rows a later `delete_staged` removes.
    /// Returns how many were frozen.
    fn stage_delete(&mut self) -> usize;

    fn unstage_delete(&mut self);

    async fn delete_staged(&mut self) -> bool;

    fn detail(&self, row: usize) -> Option<Vec<(&'static str, String)>>;

    /// The last failure reported by the view-model, cleared once taken.
    fn take_error(&mut self) -> Option<String>;
}

pub struct Panel<R>
where
    R: Repository,
    R::Record: TableRow,
{
    kind: EntityKind,
    view: ViewModel<R>,
    table: TableAdapter<R::Record>,
    events: broadcast::Receiver<ViewEvent<R::Record>>,
    relabel: Vec<(&'static str, &'static str)>,
    staged: Vec<KeyOf<R>>,
    editing: Option<KeyOf<R>>,
    error: Option<String>,
}

impl<R> Panel<R>
where
    R: Repository,
    R::Record: TableRow + FormInput,
{
    pub fn new(kind: EntityKind, repository: R) -> Self {
        let view = ViewModel::new(repository);
        let events = view.subscribe();
        Self {
            kind,
            view,
            table: TableAdapter::new(),
            events,
            relabel: Vec::new(),
            staged: Vec::new(),
            editing: None,
            error: None,
        }
    }

    /// Renames a column everywhere it appears: headers, form and detail view.
    pub fn relabel(mut self, from: &'static str, to: &'static str) -> Self {
        self.table = self.table.relabel(from, to);
        self.relabel.push((from, to));
        self
    }

    /// Applies everything the view-model published since the last call.
    fn drain(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(ViewEvent::Changed(records)) => self.table.replace(records),
                Ok(ViewEvent::Error(message)) => self.error = Some(message),
                Err(TryRecvError::Lagged(_)) => self.table.replace(self.view.records().to_vec()),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

#[async_trait]
impl<R> EntityPanel for Panel<R>
where
    R: Repository,
    R::Record: TableRow + FormInput,
{
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn headers(&self) -> Vec<&'static str> {
        (1..self.table.column_count() - 1).filter_map(|c| self.table.header(c)).collect()
    }

    fn rows(&self) -> Vec<PanelRow> {
        let data = self.table.column_count() - 1;
        (0..self.table.row_count())
            .map(|row| {
                let cells = (1..data)
                    .filter_map(|c| match self.table.cell(row, c, Role::Display) {
                        Some(Cell::Text(text)) => Some(text),
                        _ => None,
                    })
                    .collect();
                let checked = matches!(
                    self.table.cell(row, 0, Role::CheckState),
                    Some(Cell::Checked(true))
                );
                let selectable = self.table.record_at(row).and_then(|r| r.key()).is_some();
                PanelRow { cells, checked, selectable }
            })
            .collect()
    }

    fn form_fields(&self) -> Vec<FieldSpec> {
        R::Record::fields()
            .iter()
            .map(|field| {
                let label = self
                    .relabel
                    .iter()
                    .find(|(from, _)| *from == field.label)
                    .map_or(field.label, |&(_, to)| to);
                FieldSpec { label, ..*field }
            })
            .collect()
    }

    async fn load(&mut self) -> bool {
        let ok = self.view.load().await;
        self.drain();
        ok
    }

    async fn create(&mut self, values: &FormValues) -> Result<bool, ValidationError> {
        let record = R::Record::from_form(values)?;
        let ok = self.view.add(&record).await;
        self.drain();
        Ok(ok)
    }

    fn locked_fields(&self) -> &'static [&'static str] {
        R::Record::key_fields()
    }

    async fn begin_edit(&mut self, row: usize) -> Option<FormValues> {
        let key = self.table.record_at(row).and_then(Keyed::key)?;
        let stored = self.view.fetch(&key).await;
        self.drain();
        let values = stored?.to_form();
        self.editing = Some(key);
        Some(values)
    }

    async fn save_edit(&mut self, values: &FormValues) -> Result<bool, ValidationError> {
        let Some(key) = self.editing.clone() else {
            return Ok(false);
        };
        let record = R::Record::from_form(values)?.with_key(key);
        let ok = self.view.update(&record).await;
        self.drain();
        if ok {
            self.editing = None;
        }
        Ok(ok)
    }

    fn toggle(&mut self, row: usize) -> bool {
        self.table.toggle(row)
    }

    fn stage_delete(&mut self) -> usize {
        self.staged = self.table.selected_keys();
        self.staged.len()
    }

    fn unstage_delete(&mut self) {
        self.staged.clear();
    }

    async fn delete_staged(&mut self) -> bool {
        let keys = std::mem::take(&mut self.staged);
        if keys.is_empty() {
            return false;
        }
        let ok = self.view.delete(&keys).await;
        self.drain();
        if ok {
            self.table.clear_selection();
        }
        ok
    }

    fn detail(&self, row: usize) -> Option<Vec<(&'static str, String)>> {
        self.table.detail(row)
    }

    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::{EvaluationRepository, MovieRepository},
        testing::{TestDb, fixtures},
    };

    fn movie_form(title: &str) -> FormValues {
        [
            ("title", title),
            ("country", "Chile"),
            ("director", "Andrés Wood"),
            ("duration_minutes", "115"),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn created_rows_show_up_formatted() {
        let db = TestDb::new().await;
        let mut panel = Panel::new(EntityKind::Movie, MovieRepository::new(db.provider()));

        assert!(panel.load().await);
        assert!(panel.rows().is_empty());
        assert_eq!(panel.create(&movie_form("Machuca")).await, Ok(true));

        let rows = panel.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), panel.headers().len());
        assert_eq!(rows[0].cells[1], "Machuca");
        assert!(rows[0].selectable);
        assert!(!rows[0].checked);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_database() {
        let db = TestDb::new().await;
        let mut panel = Panel::new(EntityKind::Movie, MovieRepository::new(db.provider()));

        let err = panel.create(&movie_form("")).await.unwrap_err();
        assert_eq!(err, ValidationError::Required("Title"));
        assert!(MovieRepository::new(db.provider()).get_all().await.unwrap().is_empty());
        assert_eq!(panel.take_error(), None);
    }

    async fn panel_with(db: &TestDb, titles: &[&str]) -> Panel<MovieRepository> {
        let repository = MovieRepository::new(db.provider());
        for title in titles {
            repository.add(&fixtures::movie(title)).await.unwrap();
        }
        let mut panel = Panel::new(EntityKind::Movie, MovieRepository::new(db.provider()));
        panel.load().await;
        panel
    }

    fn titles(panel: &Panel<MovieRepository>) -> Vec<String> {
        panel.rows().into_iter().map(|row| row.cells[1].clone()).collect()
    }

    #[tokio::test]
    async fn deleting_the_staged_rows_clears_the_selection() {
        let db = TestDb::new().await;
        let mut panel = panel_with(&db, &["Machuca", "No", "Gloria"]).await;

        panel.toggle(0);
        panel.toggle(2);
        assert_eq!(panel.stage_delete(), 2);
        assert!(panel.delete_staged().await);

        assert!(panel.table.selected_keys().is_empty());
        assert_eq!(titles(&panel), vec!["No"]);
        // nothing left staged
        assert!(!panel.delete_staged().await);
    }

    #[tokio::test]
    async fn rows_ticked_after_staging_are_kept() {
        let db = TestDb::new().await;
        let mut panel = panel_with(&db, &["Machuca", "No", "Gloria"]).await;

        panel.toggle(0);
        assert_eq!(panel.stage_delete(), 1);
        panel.toggle(1);
        panel.toggle(2);
        assert!(panel.delete_staged().await);

        assert_eq!(titles(&panel), vec!["No", "Gloria"]);
    }

    #[tokio::test]
    async fn unstaged_rows_survive() {
        let db = TestDb::new().await;
        let mut panel = panel_with(&db, &["Machuca", "No"]).await;

        panel.toggle(1);
        panel.stage_delete();
        panel.unstage_delete();

        assert!(!panel.delete_staged().await);
        assert_eq!(titles(&panel).len(), 2);
    }

    #[tokio::test]
    async fn edit_rewrites_the_chosen_record() {
        let db = TestDb::new().await;
        let mut panel = panel_with(&db, &["Machuca", "No"]).await;

        let values = panel.begin_edit(1).await.unwrap();
        assert_eq!(values.get("title"), "No");
        let mut edited: FormValues = [
            ("title", "No (2012)"),
            ("country", values.get("country")),
            ("director", "Andrés Wood"),
            ("duration_minutes", "118"),
        ]
        .into_iter()
        .collect();
        assert_eq!(panel.save_edit(&edited).await, Ok(true));

        assert_eq!(titles(&panel), vec!["Machuca", "No (2012)"]);
        assert_eq!(panel.detail(1).unwrap()[3], ("Director", "Andrés Wood".to_string()));
        // the edit is finished once saved
        edited = movie_form("Otra");
        assert_eq!(panel.save_edit(&edited).await, Ok(false));
        assert_eq!(panel.take_error(), None);
    }

    #[tokio::test]
    async fn invalid_edit_keeps_the_stored_row() {
        let db = TestDb::new().await;
        let mut panel = panel_with(&db, &["Machuca"]).await;
        panel.begin_edit(0).await.unwrap();

        let err = panel.save_edit(&movie_form("")).await.unwrap_err();
        assert_eq!(err, ValidationError::Required("Title"));
        assert_eq!(titles(&panel), vec!["Machuca"]);
        assert_eq!(panel.save_edit(&movie_form("Machuca")).await, Ok(true));
    }

    #[tokio::test]
    async fn editing_a_vanished_row_reports_it() {
        let db = TestDb::new().await;
        let mut panel = panel_with(&db, &["Machuca"]).await;
        let id = MovieRepository::new(db.provider()).get_all().await.unwrap()[0].id.unwrap();
        MovieRepository::new(db.provider()).delete_many(&[id]).await.unwrap();

        assert_eq!(panel.begin_edit(0).await, None);
        assert_eq!(panel.take_error().as_deref(), Some("the record no longer exists"));
        assert_eq!(panel.begin_edit(5).await, None);
    }

    #[tokio::test]
    async fn evaluation_subject_is_relabelled() {
        let db = TestDb::new().await;
        let panel = Panel::new(
            EntityKind::Evaluation,
            EvaluationRepository::new(db.provider(), db.schema.clone()),
        )
        .relabel("Subject ID", "Movie ID");

        assert_eq!(panel.headers()[1], "Movie ID");
        assert_eq!(panel.form_fields()[1].label, "Movie ID");
        assert_eq!(panel.form_fields()[1].name, "subject_id");
        assert_eq!(panel.locked_fields(), &["jury_id", "subject_id"]);
    }
}
