use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse input file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: invalid URL \"{url}\": {source}")]
    InvalidUrl {
        row: usize,
        url: String,
        source: url::ParseError,
    },

    #[error("Row {row}: expected 4 columns (title, memo, url, ignored), found {found}")]
    ColumnCount { row: usize, found: usize },

    #[error("Invalid row window: {0}")]
    InvalidWindow(String),

    #[error("Invalid list name: {0}")]
    InvalidListName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
