use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("failed to open workbook {path:?}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("worksheet '{sheet}' not found in {path:?}")]
    MissingSheet { sheet: String, path: PathBuf },

    #[error("failed to save workbook {path:?}: {message}")]
    Save { path: PathBuf, message: String },
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("image URL has no file name: {0}")]
    NoFileName(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write image {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid selector for {field}: '{selector}' ({message})")]
    Selector {
        field: &'static str,
        selector: String,
        message: String,
    },

    #[error("no selectors configured for {0}")]
    EmptySelectors(&'static str),
}
