//! Scripted `UiDriver` for tests: a tiny model of the mapping application's
//! save UI, plus an action log the tests assert against.

use crate::driver::{InputKind, Locator, PageStatus, UiDriver};
use crate::{Error, Result, ui_map};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

pub struct FakeDriver {
    /// Display name of the list under test; clicking its menu entry saves.
    list_label: String,

    // Configuration read on every page load.
    pub signed_in: bool,
    pub saved_on_load: bool,
    pub memo_on_load: bool,
    pub page_renders: bool,
    status_queue: VecDeque<u16>,
    reveal_after: Option<(String, u32)>,

    // Live page state.
    pub saved: bool,
    pub has_memo: bool,
    pub lists_visible: HashSet<String>,
    pub reload_count: u32,
    pub actions: Vec<String>,
    menu_open: bool,
    pending_save: bool,
}

impl FakeDriver {
    pub fn new(list_label: &str) -> Self {
        Self {
            list_label: list_label.to_string(),
            signed_in: false,
            saved_on_load: false,
            memo_on_load: false,
            page_renders: true,
            status_queue: VecDeque::new(),
            reveal_after: None,
            saved: false,
            has_memo: false,
            lists_visible: HashSet::new(),
            reload_count: 0,
            actions: Vec::new(),
            menu_open: false,
            pending_save: false,
        }
    }

    /// Queue the HTTP status of the next navigation (default 200).
    pub fn push_status(&mut self, status: u16) {
        self.status_queue.push_back(status);
    }

    /// Open the save menu directly, for tests that start at the engine.
    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    /// Make the named list reach the save menu only after N reloads,
    /// modeling eventual consistency of a just-created list.
    pub fn reveal_list_after_reloads(&mut self, name: &str, reloads: u32) {
        self.reveal_after = Some((name.to_string(), reloads));
    }

    fn is_entry_click(&self, text: &str) -> bool {
        text == self.list_label || self.lists_visible.contains(text)
    }

    fn timeout_error(&self, locator: &Locator, timeout: Option<Duration>) -> Error {
        Error::ElementTimeout {
            what: locator.to_string(),
            timeout: timeout.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UiDriver for FakeDriver {
    async fn navigate(&mut self, url: &Url) -> Result<PageStatus> {
        self.actions.push(format!("navigate {url}"));
        self.menu_open = false;
        self.pending_save = false;
        self.saved = self.saved_on_load;
        self.has_memo = self.memo_on_load;
        let status = self.status_queue.pop_front().unwrap_or(200);
        Ok(PageStatus(status))
    }

    async fn reload(&mut self) -> Result<()> {
        self.actions.push("reload".to_string());
        self.reload_count += 1;
        self.menu_open = false;
        if let Some((name, reloads)) = &self.reveal_after {
            if self.reload_count >= *reloads {
                self.lists_visible.insert(name.clone());
            }
        }
        Ok(())
    }

    async fn has_cookie(&mut self, name: &str) -> Result<bool> {
        Ok(name == ui_map::AUTH_COOKIE && self.signed_in)
    }

    async fn wait_for(&mut self, locator: &Locator, timeout: Option<Duration>) -> Result<()> {
        if *locator == ui_map::place_ready_marker() {
            return if self.page_renders {
                Ok(())
            } else {
                Err(self.timeout_error(locator, timeout))
            };
        }
        if *locator == ui_map::save_menu() {
            return if self.menu_open {
                Ok(())
            } else {
                Err(self.timeout_error(locator, timeout))
            };
        }
        if *locator == ui_map::saved_confirmation(&self.list_label) {
            return if self.saved || self.pending_save {
                self.saved = true;
                self.pending_save = false;
                Ok(())
            } else {
                // Returning instead of hanging keeps a broken test visible.
                Err(self.timeout_error(locator, timeout))
            };
        }
        Ok(())
    }

    async fn is_present(&mut self, locator: &Locator) -> Result<bool> {
        if *locator == ui_map::saved_confirmation(&self.list_label) {
            return Ok(self.saved);
        }
        if *locator == ui_map::memo_marker(&self.list_label) {
            return Ok(self.has_memo);
        }
        if let Locator::Text(name) = locator {
            return Ok(self.menu_open && self.lists_visible.contains(name));
        }
        Ok(false)
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        self.actions.push(format!("click {locator}"));
        if *locator == ui_map::save_button() {
            self.menu_open = true;
        } else if *locator == ui_map::create_list_button() {
            self.pending_save = true;
        } else if *locator == ui_map::memo_done_button() {
            self.has_memo = true;
        } else if let Locator::Text(text) = locator {
            if self.is_entry_click(text) {
                self.pending_save = true;
            }
        }
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()> {
        self.actions.push(format!("type \"{text}\" into {locator}"));
        Ok(())
    }

    async fn press_enter_and_wait(
        &mut self,
        locator: &Locator,
        _timeout: Option<Duration>,
    ) -> Result<()> {
        self.actions
            .push(format!("press Enter on {locator} and await navigation"));
        if *locator == Locator::Input(InputKind::Password) {
            self.signed_in = true;
        }
        Ok(())
    }

    async fn wait_for_navigation(&mut self, _timeout: Option<Duration>) -> Result<()> {
        self.actions.push("wait for navigation".to_string());
        Ok(())
    }
}
