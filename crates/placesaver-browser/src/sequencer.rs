use crate::driver::UiDriver;
use crate::lists::{ListCreationState, ListResolutionEngine};
use crate::session::SessionController;
use crate::{Error, Result, ui_map};
use placesaver_core::{ListTarget, MemoStatus, PlaceRecord, SaveOutcome};
use std::time::Duration;

/// Bound on the wait for the place page's rendered marker.
const PAGE_READY_TIMEOUT: Duration = Duration::from_secs(10);

/// The per-record pipeline: navigate, ensure session, ensure page readiness,
/// ensure the place sits in the target list, ensure the memo.
///
/// Every step is idempotent against UI state left behind by earlier runs: an
/// already saved place is not saved again, an existing memo is never
/// overwritten. Failures never propagate; each record yields a `SaveOutcome`
/// so the importer can carry on with the rest of the batch.
pub struct SaveSequencer {
    session: SessionController,
    lists: ListResolutionEngine,
    target: ListTarget,
}

impl SaveSequencer {
    pub fn new(session: SessionController, lists: ListResolutionEngine, target: ListTarget) -> Self {
        Self {
            session,
            lists,
            target,
        }
    }

    pub fn target(&self) -> &ListTarget {
        &self.target
    }

    /// Save one place, reporting the outcome instead of failing.
    pub async fn save(
        &self,
        driver: &mut dyn UiDriver,
        creation: &mut ListCreationState,
        record: &PlaceRecord,
    ) -> SaveOutcome {
        tracing::info!("Saving place \"{}\"", record.title);
        match self.try_save(driver, creation, record).await {
            Ok(memo) => SaveOutcome::saved(&record.title, memo),
            Err(e) => SaveOutcome::failed(&record.title, e.to_string()),
        }
    }

    async fn try_save(
        &self,
        driver: &mut dyn UiDriver,
        creation: &mut ListCreationState,
        record: &PlaceRecord,
    ) -> Result<MemoStatus> {
        tracing::debug!("Open page {}", record.url);
        let status = driver.navigate(&record.url).await?;
        if !status.success() {
            return Err(Error::HttpStatus(status.code()));
        }

        self.session.ensure_signed_in(driver).await?;

        tracing::debug!("Wait for page rendering");
        driver
            .wait_for(&ui_map::place_ready_marker(), Some(PAGE_READY_TIMEOUT))
            .await?;

        self.ensure_saved(driver, creation).await?;
        self.ensure_memo(driver, record).await
    }

    /// Put the place into the target list unless the confirmation marker
    /// shows it is already there.
    async fn ensure_saved(
        &self,
        driver: &mut dyn UiDriver,
        creation: &mut ListCreationState,
    ) -> Result<()> {
        let confirmation = ui_map::saved_confirmation(self.target.display_name());
        if driver.is_present(&confirmation).await? {
            tracing::debug!("Place already saved to \"{}\"", self.target.display_name());
            return Ok(());
        }

        tracing::debug!("Click save button");
        driver.click(&ui_map::save_button()).await?;
        driver
            .wait_for(&ui_map::save_menu(), Some(PAGE_READY_TIMEOUT))
            .await?;

        if self.target.is_custom() {
            self.lists
                .resolve(driver, creation, self.target.display_name())
                .await?;
        } else {
            tracing::debug!("Click \"{}\" in save menu", self.target.display_name());
            driver
                .click(&ui_map::save_menu_entry(self.target.display_name()))
                .await?;
        }

        tracing::debug!("Wait until saving finishes");
        driver.wait_for(&confirmation, None).await?;
        Ok(())
    }

    /// Attach the record's memo, never touching a memo that already exists.
    async fn ensure_memo(
        &self,
        driver: &mut dyn UiDriver,
        record: &PlaceRecord,
    ) -> Result<MemoStatus> {
        let Some(memo) = &record.memo else {
            return Ok(MemoStatus::NotRequested);
        };

        let list_name = self.target.display_name();
        if !self.target.kind().supports_memos() {
            tracing::warn!(
                "List \"{list_name}\" does not support notes, skipping memo. \
                 Name: \"{}\". Memo: \"{memo}\". URL: \"{}\"",
                record.title,
                record.url
            );
            return Ok(MemoStatus::Conflict(format!(
                "list \"{list_name}\" does not support notes"
            )));
        }

        if driver.is_present(&ui_map::memo_marker(list_name)).await? {
            tracing::warn!(
                "Memo already exists, please append manually. \
                 Name: \"{}\". Memo: \"{memo}\". URL: \"{}\"",
                record.title,
                record.url
            );
            return Ok(MemoStatus::Conflict(
                "a note already exists on this entry".into(),
            ));
        }

        tracing::debug!("Add memo: \"{memo}\"");
        let add_button = ui_map::add_memo_button(list_name);
        driver.wait_for(&add_button, Some(PAGE_READY_TIMEOUT)).await?;
        driver.click(&add_button).await?;

        let memo_input = ui_map::memo_input();
        driver.wait_for(&memo_input, Some(PAGE_READY_TIMEOUT)).await?;
        driver.type_text(&memo_input, memo).await?;

        let done = ui_map::memo_done_button();
        driver.wait_for(&done, Some(PAGE_READY_TIMEOUT)).await?;
        driver.click(&done).await?;

        Ok(MemoStatus::Written)
    }
}
