//! Open `.csv` vault files in a spreadsheet grid and create new ones from a
//! folder picker.

pub mod error;
pub mod file_io;
pub mod file_state;
pub mod folder_picker;
pub mod logging;
pub mod notice;
pub mod path;
pub mod plugin;
pub mod position;
pub mod settings;
pub mod transcoder;
pub mod vault;
pub mod view;

pub use error::{FormatError, PluginError, VaultError};
pub use plugin::Plugin;
pub use transcoder::{Cell, Dialect, Grid, GridPayload, Row, Transcoder, decode, encode};
pub use view::{CsvView, GridWidget, MemoryGrid};
