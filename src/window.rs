use tracing::{debug, info};

use crate::{
    error::ValidationError,
    forms::FormValues,
    panel::EntityPanel,
    registry::{self, Context, EntityKind},
};

const MENU_STATUS: &str = "Choose a table to manage.";
const NOTHING_SELECTED: &str = "Select at least one row to delete.";

pub enum View {
    Menu,
    Table(Box<dyn EntityPanel>),
}

/// A read-only record view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detail {
    pub title: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

/// The application window: either the entity menu or one open table, plus
/// the status line, a one-shot error banner and a pending delete confirmation.
pub struct MainWindow {
    context: Context,
    view: View,
    status: String,
    error: Option<String>,
    pending_delete: Option<usize>,
}

impl MainWindow {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            view: View::Menu,
            status: MENU_STATUS.to_string(),
            error: None,
            pending_delete: None,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Number of rows waiting for a yes/no answer before they are deleted.
    pub fn pending_delete(&self) -> Option<usize> {
        self.pending_delete
    }

    /// The error to show, cleared once taken.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    pub async fn open(&mut self, kind: EntityKind) {
        let entry = registry::entry(kind);
        let mut panel = (entry.open)(&self.context);
        info!(entity = entry.label, "opening table");
        panel.load().await;
        self.error = panel.take_error();
        self.pending_delete = None;
        self.status = loaded_status(entry.label, panel.as_ref());
        self.view = View::Table(panel);
    }

    pub fn back(&mut self) {
        self.view = View::Menu;
        self.pending_delete = None;
        self.status = MENU_STATUS.to_string();
    }

    pub async fn reload(&mut self) {
        let View::Table(panel) = &mut self.view else {
            return;
        };
        if panel.load().await {
            self.status = loaded_status(panel.kind().label(), panel.as_ref());
        }
        self.error = panel.take_error();
    }

    /// `Err` leaves everything as it was so the form can be shown again.
    pub async fn create(&mut self, values: &FormValues) -> Result<bool, ValidationError> {
        let View::Table(panel) = &mut self.view else {
            return Ok(false);
        };
        let saved = panel.create(values).await?;
        if saved {
            let loaded = loaded_status(panel.kind().label(), panel.as_ref());
            self.status = format!("Record added. {loaded}");
        }
        self.error = panel.take_error();
        Ok(saved)
    }

    /// Starts editing `row` and returns the stored values to fill the form with.
    pub async fn edit(&mut self, row: usize) -> Option<FormValues> {
        let View::Table(panel) = &mut self.view else {
            return None;
        };
        let values = panel.begin_edit(row).await;
        self.error = panel.take_error();
        values
    }

    /// Saves the record opened by `edit`. `Err` keeps the edit open.
    pub async fn save(&mut self, values: &FormValues) -> Result<bool, ValidationError> {
        let View::Table(panel) = &mut self.view else {
            return Ok(false);
        };
        let saved = panel.save_edit(values).await?;
        if saved {
            self.status = "Record updated.".to_string();
        }
        self.error = panel.take_error();
        Ok(saved)
    }

    pub fn toggle(&mut self, row: usize) -> bool {
        match &mut self.view {
            View::Table(panel) => panel.toggle(row),
            View::Menu => false,
        }
    }

    /// Asks for confirmation. The rows selected now are the ones a yes removes.
    pub fn request_delete(&mut self) {
        let View::Table(panel) = &mut self.view else {
            return;
        };
        match panel.stage_delete() {
            0 => self.error = Some(NOTHING_SELECTED.to_string()),
            count => self.pending_delete = Some(count),
        }
    }

    /// Answers the pending confirmation. Without one this does nothing.
    pub async fn confirm_delete(&mut self, yes: bool) {
        let Some(count) = self.pending_delete.take() else {
            return;
        };
        let View::Table(panel) = &mut self.view else {
            return;
        };
        if !yes {
            panel.unstage_delete();
            debug!(count, "delete cancelled");
            return;
        }
        if panel.delete_staged().await {
            self.status = format!("Deleted {count} record(s).");
        }
        self.error = panel.take_error();
    }

    pub fn detail(&self, row: usize) -> Option<Detail> {
        let View::Table(panel) = &self.view else {
            return None;
        };
        let fields = panel.detail(row)?;
        Some(Detail { title: panel.kind().label(), fields })
    }
}

fn loaded_status(label: &str, panel: &dyn EntityPanel) -> String {
    format!("{label}: {} record(s).", panel.rows().len())
}
