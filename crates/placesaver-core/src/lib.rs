pub mod error;
pub mod list;
pub mod outcome;
pub mod record;

pub use error::{Error, Result};
pub use list::{ListKind, ListTarget};
pub use outcome::{MemoStatus, SaveOutcome};
pub use record::{PlaceRecord, RecordSource, RowWindow};
