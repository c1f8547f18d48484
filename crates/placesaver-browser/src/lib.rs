pub mod cdp;
pub mod chrome;
pub mod driver;
pub mod error;
pub mod importer;
pub mod lists;
pub mod sequencer;
pub mod session;
pub mod ui_map;

#[cfg(test)]
mod fake;

pub use cdp::CdpDriver;
pub use chrome::find_chrome;
pub use driver::{InputKind, Locator, PageStatus, UiDriver};
pub use error::{Error, Result};
pub use importer::{ImportSummary, PlaceImporter};
pub use lists::{ListCreationState, ListResolutionEngine};
pub use sequencer::SaveSequencer;
pub use session::SessionController;
