//! The one place that knows how the mapping application's UI is worded.
//!
//! Everything above the driver refers to affordances through these
//! constructors. The UI renders in a fixed locale (the driver forces the
//! `accept-language` header), so text and label lookups are stable.

use crate::driver::{InputKind, Locator};

/// Session cookie set once the account is authenticated.
pub const AUTH_COOKIE: &str = "SID";

pub fn sign_in_link() -> Locator {
    Locator::Text("Sign in".into())
}

pub fn email_input() -> Locator {
    Locator::Input(InputKind::Email)
}

pub fn password_input() -> Locator {
    Locator::Input(InputKind::Password)
}

/// Appears once a place page has fully rendered.
pub fn place_ready_marker() -> Locator {
    Locator::LabelContains("Address".into())
}

pub fn save_button() -> Locator {
    Locator::Label("Save".into())
}

/// The open save menu, independent of which lists it offers.
pub fn save_menu() -> Locator {
    Locator::Role("menuitemcheckbox")
}

/// Entry for one list inside the open save menu.
pub fn save_menu_entry(list: &str) -> Locator {
    Locator::Text(list.into())
}

/// Confirmation shown after a place was saved to the list.
pub fn saved_confirmation(list: &str) -> Locator {
    Locator::LabelContains(format!("Saved in {list}"))
}

pub fn new_list_button() -> Locator {
    Locator::Text("New list".into())
}

pub fn list_name_input() -> Locator {
    Locator::Label("List name".into())
}

pub fn create_list_button() -> Locator {
    Locator::Text("Create".into())
}

/// Present when the list entry already carries a note.
pub fn memo_marker(list: &str) -> Locator {
    Locator::Label(format!("Edit note in {list}"))
}

pub fn add_memo_button(list: &str) -> Locator {
    Locator::Label(format!("Add note to {list}"))
}

pub fn memo_input() -> Locator {
    Locator::Input(InputKind::Multiline)
}

pub fn memo_done_button() -> Locator {
    Locator::Text("Done".into())
}
