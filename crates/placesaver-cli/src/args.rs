use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use placesaver_core::{ListKind, ListTarget};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "placesaver")]
#[command(
    about = "Imports a CSV of places into a saved-places list of a mapping web app",
    long_about = "Reads place records (title, memo, URL) from a CSV file and saves each one \
                  into a saved-places list by driving the mapping application's UI in a real \
                  browser. Sign-in challenges (2FA) are waited out in the visible browser window."
)]
pub struct Cli {
    /// Path to the CSV file (columns: title, memo, url, ignored)
    #[arg(value_name = "CSV_FILE")]
    pub file: PathBuf,

    /// Email address of the account to import into
    #[arg(long)]
    pub email: String,

    /// Password of the account to import into
    #[arg(long)]
    pub pass: String,

    /// Which list to save places into
    #[arg(long = "type", value_enum, default_value = "favorites")]
    pub list_type: ListType,

    /// Name of the custom list, at most 40 characters (required with --type custom)
    #[arg(long)]
    pub list_name: Option<String>,

    /// First row to handle, 1-based (the default skips a header row)
    #[arg(long, default_value_t = 2)]
    pub from: usize,

    /// Last row to handle, 1-based inclusive
    #[arg(long)]
    pub to: Option<usize>,

    /// Path to the Chrome/Chromium binary
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Show debug log
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ListType {
    Favorites,
    WantToGo,
    TravelPlans,
    Starred,
    Custom,
}

impl From<ListType> for ListKind {
    fn from(list_type: ListType) -> Self {
        match list_type {
            ListType::Favorites => ListKind::Favorites,
            ListType::WantToGo => ListKind::WantToGo,
            ListType::TravelPlans => ListKind::TravelPlans,
            ListType::Starred => ListKind::Starred,
            ListType::Custom => ListKind::Custom,
        }
    }
}

/// Combine `--type` and `--list-name` into the save target.
///
/// `--list-name` is required exactly when the type is custom and forbidden
/// otherwise; name length is validated here, before any browser work.
pub fn resolve_target(list_type: ListType, list_name: Option<&str>) -> Result<ListTarget> {
    match (list_type, list_name) {
        (ListType::Custom, Some(name)) => Ok(ListTarget::custom(name)?),
        (ListType::Custom, None) => bail!("--list-name is required when --type is custom"),
        (_, Some(_)) => bail!("--list-name is only valid when --type is custom"),
        (list_type, None) => Ok(ListTarget::fixed(list_type.into())?),
    }
}
