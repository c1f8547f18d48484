use crate::driver::UiDriver;
use crate::{Error, Result, ui_map};
use std::time::Duration;

/// Whether the custom list has been created during this run.
///
/// Shared across all records of a run and threaded into the engine by
/// mutable reference; strictly sequential processing makes that safe without
/// a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCreationState {
    /// No record has needed the list yet.
    NotYetAttempted,
    /// The list was created while saving an earlier record, but has not been
    /// observed in a save menu since.
    CreatedThisRun,
    /// A save menu entry for the list has been seen and clicked.
    ConfirmedVisible,
}

/// Makes a custom-named list clickable in the save menu.
///
/// Newly created lists are not immediately visible to subsequent page loads,
/// so records after the first poll for the entry: sleep, reload, reopen the
/// save menu, re-check. By default the polling has no retry cap, matching a
/// human-supervised run; callers can set one, and exhausting it surfaces
/// `Error::ListStalled`.
pub struct ListResolutionEngine {
    retry_interval: Duration,
    menu_timeout: Duration,
    max_retries: Option<u32>,
}

impl ListResolutionEngine {
    pub fn new() -> Self {
        Self {
            retry_interval: Duration::from_secs(3),
            menu_timeout: Duration::from_secs(10),
            max_retries: None,
        }
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Cap the consistency-retry loop instead of polling forever.
    pub fn with_retry_cap(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Leave the UI saving into the named list.
    ///
    /// Expects the save menu to be open. On return either a menu entry was
    /// clicked or the list was just created (creation transitions straight
    /// into the saved state); in both cases the caller waits for the standard
    /// saved confirmation.
    pub async fn resolve(
        &self,
        driver: &mut dyn UiDriver,
        state: &mut ListCreationState,
        name: &str,
    ) -> Result<()> {
        let entry = ui_map::save_menu_entry(name);

        if driver.is_present(&entry).await? {
            tracing::debug!("List \"{name}\" already offered, clicking entry");
            driver.click(&entry).await?;
            *state = ListCreationState::ConfirmedVisible;
            return Ok(());
        }

        if *state == ListCreationState::NotYetAttempted {
            tracing::debug!("Creating list \"{name}\"");
            driver.click(&ui_map::new_list_button()).await?;

            let name_input = ui_map::list_name_input();
            driver.wait_for(&name_input, Some(self.menu_timeout)).await?;
            driver.type_text(&name_input, name).await?;
            driver.click(&ui_map::create_list_button()).await?;

            *state = ListCreationState::CreatedThisRun;
            return Ok(());
        }

        // The list was created earlier in the run but has not propagated to
        // this page load yet.
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if self.max_retries.is_some_and(|cap| attempts > cap) {
                return Err(Error::ListStalled {
                    name: name.to_string(),
                    attempts: attempts - 1,
                });
            }

            tracing::debug!("List \"{name}\" not visible yet, retrying (attempt {attempts})");
            tokio::time::sleep(self.retry_interval).await;
            driver.reload().await?;

            let save_button = ui_map::save_button();
            driver
                .wait_for(&save_button, Some(self.menu_timeout))
                .await?;
            driver.click(&save_button).await?;
            driver
                .wait_for(&ui_map::save_menu(), Some(self.menu_timeout))
                .await?;

            if driver.is_present(&entry).await? {
                driver.click(&entry).await?;
                *state = ListCreationState::ConfirmedVisible;
                return Ok(());
            }
        }
    }
}

impl Default for ListResolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeDriver;

    #[tokio::test]
    async fn existing_entry_is_clicked_without_creation() {
        let mut driver = FakeDriver::new("Trip");
        driver.lists_visible.insert("Trip".to_string());
        driver.open_menu();

        let engine = ListResolutionEngine::new();
        let mut state = ListCreationState::NotYetAttempted;
        engine.resolve(&mut driver, &mut state, "Trip").await.unwrap();

        assert_eq!(state, ListCreationState::ConfirmedVisible);
        assert!(!driver.actions.iter().any(|a| a.contains("New list")));
    }

    #[tokio::test]
    async fn first_use_creates_the_list_once() {
        let mut driver = FakeDriver::new("Trip");
        driver.open_menu();

        let engine = ListResolutionEngine::new();
        let mut state = ListCreationState::NotYetAttempted;
        engine.resolve(&mut driver, &mut state, "Trip").await.unwrap();

        assert_eq!(state, ListCreationState::CreatedThisRun);
        assert!(driver.actions.contains(&"click text \"New list\"".to_string()));
        assert!(driver.actions.contains(&"type \"Trip\" into label \"List name\"".to_string()));
        assert!(driver.actions.contains(&"click text \"Create\"".to_string()));
        // Creation flows straight into the saved state; no entry click.
        assert!(!driver.actions.contains(&"click text \"Trip\"".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn later_records_poll_until_the_list_propagates() {
        let mut driver = FakeDriver::new("Trip");
        driver.open_menu();
        // The entry shows up on the second reload.
        driver.reveal_list_after_reloads("Trip", 2);

        let engine = ListResolutionEngine::new();
        let mut state = ListCreationState::CreatedThisRun;
        engine.resolve(&mut driver, &mut state, "Trip").await.unwrap();

        assert_eq!(state, ListCreationState::ConfirmedVisible);
        assert_eq!(driver.reload_count, 2);
        assert!(driver.actions.contains(&"click text \"Trip\"".to_string()));
        assert!(!driver.actions.contains(&"click text \"New list\"".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_cap_surfaces_a_stalled_error() {
        let mut driver = FakeDriver::new("Trip");
        driver.open_menu();
        // Never becomes visible.

        let engine = ListResolutionEngine::new().with_retry_cap(3);
        let mut state = ListCreationState::CreatedThisRun;
        let err = engine
            .resolve(&mut driver, &mut state, "Trip")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ListStalled { attempts: 3, .. }));
        assert_eq!(state, ListCreationState::CreatedThisRun);
    }
}
