//! Plugin entry point: extension routing, commands and the new-file flow.

use crate::error::{PluginError, VaultError};
use crate::folder_picker::FolderPicker;
use crate::notice::Notifier;
use crate::path;
use crate::settings::PluginSettings;
use crate::vault::{self, StorageAdapter};
use crate::view::{CsvView, GridWidget};

pub const VIEW_TYPE: &str = "csv-view";
pub const EXTENSIONS: &[&str] = &["csv"];

/// A command that can be executed from the host's command palette
#[derive(Clone, Debug)]
pub struct Command {
    pub id: &'static str,
    pub name: &'static str,
}

impl Command {
    pub const fn new(id: &'static str, name: &'static str) -> Self {
        Self { id, name }
    }
}

pub const CREATE_CSV_FILE: &str = "create-csv-file";

/// All available commands
pub const COMMANDS: &[Command] = &[Command::new(CREATE_CSV_FILE, "Create new CSV file")];

/// View type registered for `path`, if its extension is handled.
pub fn view_type_for(path: &str) -> Option<&'static str> {
    let name = path::parse(path).name;
    let (_, ext) = name.rsplit_once('.')?;
    EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(ext))
        .then_some(VIEW_TYPE)
}

/// Path a new file named `name` gets inside `folder`. `name` may carry
/// subfolders; a `.csv` suffix is not doubled.
pub fn new_file_path(folder: &str, name: &str) -> String {
    let parsed = path::parse(name.trim());
    let base = parsed.name.strip_suffix(".csv").unwrap_or(&parsed.name);
    let base = if base.is_empty() { path::DEFAULT_NAME } else { base };
    let file_name = format!("{base}.csv");
    path::join([folder, parsed.dir.as_str(), file_name.as_str()])
}

pub struct Plugin<S: StorageAdapter, N: Notifier> {
    storage: S,
    notifier: N,
    settings: PluginSettings,
}

impl<S: StorageAdapter, N: Notifier> Plugin<S, N> {
    pub fn load(storage: S, notifier: N) -> Result<Self, PluginError> {
        let settings = PluginSettings::load(&storage)?;
        tracing::info!(view_type = VIEW_TYPE, extensions = ?EXTENSIONS, "plugin loaded");
        Ok(Self {
            storage,
            notifier,
            settings,
        })
    }

    pub fn commands(&self) -> &'static [Command] {
        COMMANDS
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: PluginSettings) -> Result<(), PluginError> {
        settings.save(&mut self.storage)?;
        self.settings = settings;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Folder picker over the current vault folders, preselecting the
    /// configured default folder when it exists.
    pub fn folder_picker(&self) -> Result<FolderPicker, PluginError> {
        let folders = self.storage.folders()?;
        let default = self.settings.default_folder.trim();
        let mut picker = FolderPicker::new(folders);
        if !default.is_empty() && !picker.select(&path::normalize(default)) {
            tracing::debug!(folder = default, "default folder not in vault");
        }
        Ok(picker)
    }

    /// Create an empty CSV file. An existing file aborts the flow before any
    /// folder is created.
    pub fn create_csv_file(&mut self, folder: &str, name: &str) -> Result<String, PluginError> {
        let file_path = new_file_path(folder, name);
        let result = self.create_empty(&file_path);
        if let Err(err) = &result {
            tracing::warn!(path = %file_path, error = %err, "creating csv file failed");
            let message = match err {
                VaultError::AlreadyExists(_) => "File already exists".to_string(),
                other => format!("Could not create {file_path}: {other}"),
            };
            self.notifier.notify(&message);
        }
        result?;
        tracing::info!(path = %file_path, "created csv file");
        Ok(file_path)
    }

    fn create_empty(&mut self, file_path: &str) -> Result<(), VaultError> {
        vault::checked_key(file_path)?;
        if self.storage.exists(file_path) {
            return Err(VaultError::AlreadyExists(file_path.to_string()));
        }
        let dir = path::parse(file_path).dir;
        let dir = path::normalize(&dir);
        if !dir.is_empty() && !self.storage.exists(&dir) {
            self.storage.create_dir_all(&dir)?;
        }
        self.storage.create(file_path, "")
    }

    /// Open a vault file in a new view backed by `widget`.
    pub fn open_view<W: GridWidget>(&self, file_path: &str, widget: W) -> Result<CsvView<W>, PluginError> {
        if view_type_for(file_path).is_none() {
            return Err(PluginError::UnsupportedFile(file_path.to_string()));
        }
        let text = self.storage.read(file_path)?;
        let mut view = CsvView::new(widget, self.settings.transcoder());
        view.open(file_path, &text)?;
        Ok(view)
    }

    /// Create a file, then open it.
    pub fn create_and_open<W: GridWidget>(
        &mut self,
        folder: &str,
        name: &str,
        widget: W,
    ) -> Result<CsvView<W>, PluginError> {
        let file_path = self.create_csv_file(folder, name)?;
        self.open_view(&file_path, widget)
    }

    pub fn save_view<W: GridWidget>(&mut self, view: &mut CsvView<W>) {
        view.request_save(&mut self.storage, &mut self.notifier);
    }
}
