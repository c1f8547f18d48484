use crate::driver::UiDriver;
use crate::lists::ListCreationState;
use crate::sequencer::SaveSequencer;
use placesaver_core::{PlaceRecord, SaveOutcome};

/// Aggregated outcomes of one run.
#[derive(Debug)]
pub struct ImportSummary {
    pub outcomes: Vec<SaveOutcome>,
}

impl ImportSummary {
    pub fn saved_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.saved).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.saved).count()
    }

    pub fn memo_conflict_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.memo_conflict()).count()
    }
}

/// Drives the whole batch through the save sequencer, one record at a time,
/// in source order. A failed record is logged and the batch continues; the
/// run itself only fails before any browser work starts.
pub struct PlaceImporter {
    sequencer: SaveSequencer,
}

impl PlaceImporter {
    pub fn new(sequencer: SaveSequencer) -> Self {
        Self { sequencer }
    }

    pub async fn run(&self, driver: &mut dyn UiDriver, records: &[PlaceRecord]) -> ImportSummary {
        let mut creation = ListCreationState::NotYetAttempted;
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            let outcome = self.sequencer.save(driver, &mut creation, record).await;
            if let Some(reason) = &outcome.failure {
                tracing::error!(
                    "Failed to save place. Name: \"{}\". Memo: \"{}\". URL: \"{}\": {reason}",
                    record.title,
                    record.memo.as_deref().unwrap_or(""),
                    record.url
                );
            }
            outcomes.push(outcome);
        }

        let summary = ImportSummary { outcomes };
        tracing::info!(
            "Imported {} of {} place(s), {} failed, {} memo conflict(s)",
            summary.saved_count(),
            records.len(),
            summary.failed_count(),
            summary.memo_conflict_count()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeDriver;
    use crate::lists::ListResolutionEngine;
    use crate::session::SessionController;
    use placesaver_core::{ListKind, ListTarget, MemoStatus};
    use url::Url;

    fn records(titles: &[&str]) -> Vec<PlaceRecord> {
        titles
            .iter()
            .map(|t| PlaceRecord {
                title: t.to_string(),
                url: Url::parse(&format!("https://maps.example.com/place/{t}")).unwrap(),
                memo: None,
            })
            .collect()
    }

    fn importer(target: ListTarget) -> PlaceImporter {
        PlaceImporter::new(SaveSequencer::new(
            SessionController::new("user@example.com", "hunter2"),
            ListResolutionEngine::new(),
            target,
        ))
    }

    #[tokio::test]
    async fn batch_of_three_favorites_all_save_in_order() {
        let mut driver = FakeDriver::new("Favorites");
        driver.signed_in = true;

        let importer = importer(ListTarget::fixed(ListKind::Favorites).unwrap());
        let summary = importer
            .run(&mut driver, &records(&["a", "b", "c"]))
            .await;

        assert_eq!(summary.saved_count(), 3);
        assert_eq!(summary.failed_count(), 0);
        assert_eq!(summary.memo_conflict_count(), 0);
        let visited: Vec<_> = driver
            .actions
            .iter()
            .filter(|a| a.starts_with("navigate"))
            .cloned()
            .collect();
        assert_eq!(
            visited,
            [
                "navigate https://maps.example.com/place/a",
                "navigate https://maps.example.com/place/b",
                "navigate https://maps.example.com/place/c",
            ]
        );
    }

    #[tokio::test]
    async fn failed_record_does_not_stop_the_batch() {
        let mut driver = FakeDriver::new("Favorites");
        driver.signed_in = true;
        // First navigation returns a server error, the second succeeds.
        driver.push_status(503);
        driver.push_status(200);

        let importer = importer(ListTarget::fixed(ListKind::Favorites).unwrap());
        let summary = importer.run(&mut driver, &records(&["bad", "good"])).await;

        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.saved_count(), 1);
        assert!(!summary.outcomes[0].saved);
        assert!(summary.outcomes[1].saved);
    }

    #[tokio::test(start_paused = true)]
    async fn second_record_polls_for_the_list_created_by_the_first() {
        let mut driver = FakeDriver::new("Trip");
        driver.signed_in = true;
        // The new list reaches the save menu after one reload.
        driver.reveal_list_after_reloads("Trip", 1);

        let importer = importer(ListTarget::custom("Trip").unwrap());
        let summary = importer.run(&mut driver, &records(&["a", "b"])).await;

        assert_eq!(summary.saved_count(), 2);
        // Exactly one creation across the batch.
        let creations = driver
            .actions
            .iter()
            .filter(|a| *a == "click text \"New list\"")
            .count();
        assert_eq!(creations, 1);
        // Record 2 went through the consistency-retry loop.
        assert!(driver.reload_count >= 1);
    }

    #[tokio::test]
    async fn outcomes_keep_record_titles() {
        let mut driver = FakeDriver::new("Favorites");
        driver.signed_in = true;

        let importer = importer(ListTarget::fixed(ListKind::Favorites).unwrap());
        let summary = importer.run(&mut driver, &records(&["a", "b"])).await;

        let titles: Vec<_> = summary.outcomes.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
        assert!(
            summary
                .outcomes
                .iter()
                .all(|o| o.memo == MemoStatus::NotRequested)
        );
    }
}
