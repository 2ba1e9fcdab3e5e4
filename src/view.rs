//! The file view that shows a CSV file through a grid widget.
//!
//! The host owns the event loop: it calls [`CsvView::set_view_data`] when a
//! file is opened, forwards every widget change to [`CsvView::on_change`],
//! and reads [`CsvView::get_view_data`] when it persists the file.

use crate::error::FormatError;
use crate::file_state::FileState;
use crate::notice::Notifier;
use crate::position::CellPosition;
use crate::transcoder::{Grid, GridPayload, Transcoder};
use crate::vault::StorageAdapter;

/// Spreadsheet widget capabilities the view relies on. Rendering, selection
/// and undo stay inside the widget.
pub trait GridWidget {
    /// Replace the widget contents.
    fn load(&mut self, payload: &GridPayload);
    /// Current contents in the change-event shape.
    fn snapshot(&self) -> GridPayload;
    /// Apply a user edit and return the change event the widget emits.
    fn set_cell(&mut self, pos: CellPosition, text: &str) -> GridPayload;
}

/// Widget without a screen; keeps rows in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryGrid {
    rows: Grid,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GridWidget for MemoryGrid {
    fn load(&mut self, payload: &GridPayload) {
        self.rows = payload.rows.clone();
    }

    fn snapshot(&self) -> GridPayload {
        GridPayload::from(self.rows.clone())
    }

    fn set_cell(&mut self, pos: CellPosition, text: &str) -> GridPayload {
        self.rows.set_text(pos.row, pos.col, text);
        self.snapshot()
    }
}

pub struct CsvView<W: GridWidget> {
    data: String,
    widget: W,
    transcoder: Transcoder,
    file_state: FileState,
}

impl<W: GridWidget> CsvView<W> {
    pub fn new(widget: W, transcoder: Transcoder) -> Self {
        Self {
            data: String::new(),
            widget,
            transcoder,
            file_state: FileState::new(),
        }
    }

    /// Bind the view to `path` and show `text`.
    pub fn open(&mut self, path: &str, text: &str) -> Result<(), FormatError> {
        self.set_view_data(text, true)?;
        self.file_state.set_path(path);
        tracing::info!(path, dialect = ?self.transcoder.dialect, "opened csv view");
        Ok(())
    }

    /// Text to persist for the current file.
    pub fn get_view_data(&self) -> &str {
        &self.data
    }

    /// Decode `text` into the widget. `clear` starts a fresh file session.
    pub fn set_view_data(&mut self, text: &str, clear: bool) -> Result<(), FormatError> {
        let grid = self.transcoder.decode(text)?;
        if clear {
            self.clear();
            self.file_state = FileState::new();
        }
        self.widget.load(&GridPayload::from(grid));
        self.data = text.to_string();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Re-encode after a widget change event; returns the new file text.
    pub fn on_change(&mut self, payload: &GridPayload) -> Result<&str, FormatError> {
        self.data = self.transcoder.encode(&payload.rows)?;
        self.file_state.mark_dirty();
        tracing::debug!(bytes = self.data.len(), "grid changed");
        Ok(&self.data)
    }

    /// Edit one cell through the widget and handle the resulting change.
    pub fn edit_cell(&mut self, pos: CellPosition, text: &str) -> Result<&str, FormatError> {
        let payload = self.widget.set_cell(pos, text);
        self.on_change(&payload)
    }

    /// Hand the current text to storage without waiting on the outcome.
    /// Failures are logged and reported through `notifier`.
    pub fn request_save(&mut self, storage: &mut dyn StorageAdapter, notifier: &mut dyn Notifier) {
        if self.file_state.is_read_only || !self.file_state.is_dirty {
            return;
        }
        let Some(path) = self.file_state.current_path.clone() else {
            return;
        };

        match storage.write(&path, &self.data) {
            Ok(()) => {
                self.file_state.mark_clean();
                tracing::info!(%path, "saved csv view");
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "saving csv view failed");
                notifier.notify(&format!("Could not save {}: {err}", self.file_state.file_name()));
            }
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn file_state(&self) -> &FileState {
        &self.file_state
    }

    pub fn file_state_mut(&mut self) -> &mut FileState {
        &mut self.file_state
    }
}
