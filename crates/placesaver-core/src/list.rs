use crate::{Error, Result};

/// Longest list name the mapping application accepts.
pub const MAX_LIST_NAME_CHARS: usize = 40;

/// The built-in saved-place lists offered by the mapping application,
/// plus user-named custom lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Favorites,
    WantToGo,
    TravelPlans,
    Starred,
    Custom,
}

impl ListKind {
    /// The starred list has no note editor in the application UI.
    pub fn supports_memos(&self) -> bool {
        !matches!(self, ListKind::Starred)
    }
}

/// A concrete save target: which list each record is saved into.
///
/// Resolved once at startup from the command line; every record in a run
/// targets the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTarget {
    kind: ListKind,
    display_name: String,
}

impl ListTarget {
    /// Target one of the built-in lists.
    pub fn fixed(kind: ListKind) -> Result<Self> {
        let display_name = match kind {
            ListKind::Favorites => "Favorites",
            ListKind::WantToGo => "Want to go",
            ListKind::TravelPlans => "Travel plans",
            ListKind::Starred => "Starred places",
            ListKind::Custom => {
                return Err(Error::InvalidListName(
                    "custom lists require a name, use ListTarget::custom".into(),
                ));
            }
        };
        Ok(Self {
            kind,
            display_name: display_name.to_string(),
        })
    }

    /// Target a user-named list, creating it on first use if necessary.
    /// Names must be 1 to 40 characters.
    pub fn custom(name: &str) -> Result<Self> {
        let len = name.chars().count();
        if len == 0 {
            return Err(Error::InvalidListName("name must not be empty".into()));
        }
        if len > MAX_LIST_NAME_CHARS {
            return Err(Error::InvalidListName(format!(
                "name is {len} characters, the maximum is {MAX_LIST_NAME_CHARS}"
            )));
        }
        Ok(Self {
            kind: ListKind::Custom,
            display_name: name.to_string(),
        })
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// The name shown for this list in the application UI.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_custom(&self) -> bool {
        self.kind == ListKind::Custom
    }
}
