use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use vaultsheets::logging;
use vaultsheets::notice::Notifier;
use vaultsheets::position::CellPosition;
use vaultsheets::settings::CONFIG_DIR;
use vaultsheets::vault::FsVault;
use vaultsheets::{Dialect, GridWidget, MemoryGrid, Plugin};

#[derive(Parser, Debug)]
#[command(name = "vaultsheets", version, about = "Spreadsheet views for CSV files in a note vault")]
struct Cli {
    /// Vault root directory
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List vault folders matching QUERY
    Folders { query: Option<String> },
    /// Create an empty CSV file in the first folder matching --folder-query
    New {
        #[arg(long)]
        folder_query: Option<String>,
        /// File name, may include subfolders
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Print the grid payload the widget is loaded with
    Show { file: String },
    /// Print one cell, e.g. `get data.csv B2`
    Get { file: String, reference: String },
    /// Edit one cell and save the file
    Set {
        file: String,
        reference: String,
        text: String,
    },
    /// Show or change plugin settings
    Settings {
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,
        #[arg(long)]
        columns: Option<usize>,
        #[arg(long)]
        default_folder: Option<String>,
    },
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.vault.join(CONFIG_DIR).join("logs");
    if let Err(err) = logging::init_logging(&log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let mut plugin = Plugin::load(FsVault::new(&cli.vault), StderrNotifier)
        .with_context(|| format!("loading vault {}", cli.vault.display()))?;

    match cli.command {
        Command::Folders { query } => {
            let mut picker = plugin.folder_picker()?;
            if let Some(query) = query {
                picker.set_input(&query);
            }
            for folder in picker.visible() {
                println!("{folder}");
            }
        }
        Command::New { folder_query, name } => {
            let mut picker = plugin.folder_picker()?;
            if let Some(query) = folder_query {
                picker.set_input(&query);
            }
            let folder = picker
                .confirm()
                .with_context(|| format!("no folder matches {:?}", picker.input()))?;
            let path = plugin.create_csv_file(&folder, &name)?;
            println!("{path}");
        }
        Command::Show { file } => {
            let view = plugin.open_view(&file, MemoryGrid::new())?;
            println!("{}", view.widget().snapshot().to_json()?);
        }
        Command::Get { file, reference } => {
            let pos = CellPosition::parse(&reference)?;
            let view = plugin.open_view(&file, MemoryGrid::new())?;
            println!("{}", view.widget().snapshot().rows.text(pos.row, pos.col));
        }
        Command::Set {
            file,
            reference,
            text,
        } => {
            let pos = CellPosition::parse(&reference)?;
            let mut view = plugin.open_view(&file, MemoryGrid::new())?;
            view.edit_cell(pos, &text)?;
            plugin.save_view(&mut view);
            if view.file_state().is_dirty {
                bail!("{} was not saved", pos.to_reference());
            }
        }
        Command::Settings {
            dialect,
            columns,
            default_folder,
        } => {
            let mut settings = plugin.settings().clone();
            if let Some(dialect) = dialect {
                settings.dialect = dialect;
            }
            if let Some(columns) = columns {
                settings.columns = columns.max(1);
            }
            if let Some(folder) = default_folder {
                settings.default_folder = folder;
            }
            if &settings != plugin.settings() {
                plugin.update_settings(settings)?;
            }
            println!("{}", serde_json::to_string_pretty(plugin.settings())?);
        }
    }

    Ok(())
}
