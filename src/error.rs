use thiserror::Error;

/// Failures while moving data between CSV text and a [`Grid`](crate::transcoder::Grid).
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected CSV text, found {found}")]
    NotText { found: &'static str },
    #[error("invalid grid payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output is not valid utf-8")]
    Utf8,
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("file already exists: {0}")]
    AlreadyExists(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("path leaves the vault: {0}")]
    OutsideVault(String),
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.into()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.into()),
            _ => Self::Io {
                path: path.into(),
                source,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("{0} is not a csv file")]
    UnsupportedFile(String),
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Error)]
pub enum CellRefError {
    #[error("cell reference is empty")]
    Empty,
    #[error("invalid cell reference: {0}")]
    Invalid(String),
}
