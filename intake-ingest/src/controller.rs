//! Statement intake controller.
//!
//! Owns the `IntakeState` and drives extractions on the tokio runtime. Each
//! accepted selection spawns one extraction task that reports back over a
//! channel; completions are only applied when the owner drains the channel, so
//! the state is never touched from another task. Nothing is cancelled: a
//! second selection while one is pending leaves both running.

use intake_core::{
    CompletionDisposition, DisplayState, ExtractionTicket, IntakeError, IntakeSettings,
    IntakeState, ParseResult, SelectedFile,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::extractor::{ExtractError, Extractor};

/// An extraction outcome waiting to be applied.
#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: ExtractionTicket,
    pub outcome: Result<ParseResult, ExtractError>,
}

pub struct IntakeController {
    state: IntakeState,
    extractor: Arc<dyn Extractor>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl IntakeController {
    pub fn new(extractor: Arc<dyn Extractor>, settings: IntakeSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: IntakeState::new(settings),
            extractor,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn display(&self) -> DisplayState {
        self.state.display()
    }

    /// Extractions started but not yet applied or discarded.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Validate `candidate` and, if accepted, start its extraction.
    ///
    /// Runs synchronously; must be called from within a tokio runtime.
    pub fn select_file(&mut self, candidate: SelectedFile) -> Result<ExtractionTicket, IntakeError> {
        let ticket = self.state.select_file(candidate.clone())?;

        let extractor = Arc::clone(&self.extractor);
        let tx = self.tx.clone();
        self.in_flight += 1;
        debug!(
            extractor = extractor.name(),
            generation = ticket.generation(),
            in_flight = self.in_flight,
            "extraction started"
        );

        // A second task waits on the extraction's handle; a panicking
        // extractor still resolves its ticket, as a failed completion.
        let name = extractor.name().to_string();
        let extraction = tokio::spawn(async move { extractor.extract(&candidate).await });
        tokio::spawn(async move {
            let outcome = match extraction.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(extractor = %name, error = %err, "extraction task aborted");
                    Err(ExtractError::Failed(format!(
                        "{name} extractor stopped unexpectedly"
                    )))
                }
            };
            // The receiver lives as long as the controller; a send error only
            // means the controller was dropped mid-flight.
            let _ = tx.send(Completion { ticket, outcome });
        });

        Ok(ticket)
    }

    /// Wait for the next extraction to resolve and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<(ExtractionTicket, CompletionDisposition)> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Apply every completion that has already resolved, without waiting.
    pub fn drain_completions(&mut self) -> Vec<(ExtractionTicket, CompletionDisposition)> {
        let mut applied = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            applied.push(self.apply(completion));
        }
        applied
    }

    /// Wait until every started extraction has resolved.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn apply(&mut self, completion: Completion) -> (ExtractionTicket, CompletionDisposition) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Completion { ticket, outcome } = completion;
        let disposition = self.state.complete(ticket, outcome.map_err(IntakeError::from));
        info!(
            generation = ticket.generation(),
            latest = self.state.latest_generation(),
            ?disposition,
            phase = ?self.state.phase(),
            in_flight = self.in_flight,
            "completion handled"
        );
        (ticket, disposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubExtractor;
    use intake_core::LifecyclePhase;
    use std::time::Duration;

    fn controller() -> IntakeController {
        IntakeController::new(
            Arc::new(StubExtractor::new(Duration::from_millis(2000))),
            IntakeSettings::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_selection_starts_nothing() {
        let mut c = controller();
        let err = c
            .select_file(SelectedFile::new("photo.png", 10, "image/png"))
            .unwrap_err();
        assert!(matches!(err, IntakeError::InvalidFileType { .. }));
        assert_eq!(c.in_flight(), 0);
        assert!(c.next_completion().await.is_none());
        assert_eq!(c.state().phase(), LifecyclePhase::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_selection_resolves_once() {
        let mut c = controller();
        let ticket = c
            .select_file(SelectedFile::new("statement.pdf", 2048, "application/pdf"))
            .unwrap();
        assert_eq!(c.in_flight(), 1);

        let (done, disposition) = c.next_completion().await.unwrap();
        assert_eq!(done, ticket);
        assert_eq!(disposition, CompletionDisposition::Applied);
        assert_eq!(c.in_flight(), 0);
        assert_eq!(c.state().result().unwrap().file_size_display, "2.00 KB");
    }

    struct PanickingExtractor;

    #[async_trait::async_trait]
    impl Extractor for PanickingExtractor {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn extract(&self, _file: &SelectedFile) -> Result<ParseResult, ExtractError> {
            panic!("extractor bug");
        }
    }

    #[tokio::test]
    async fn test_panicking_extractor_fails_instead_of_hanging() {
        let mut c = IntakeController::new(Arc::new(PanickingExtractor), IntakeSettings::default());
        c.select_file(SelectedFile::new("s.pdf", 1, "application/pdf"))
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), c.settle())
            .await
            .expect("settle returns after a panicking extraction");

        assert_eq!(c.in_flight(), 0);
        assert_eq!(c.state().phase(), LifecyclePhase::Failed);
        assert_eq!(
            c.display().error_message(),
            Some("Could not parse statement: panicking extractor stopped unexpectedly")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_before_delay_applies_nothing() {
        let mut c = controller();
        c.select_file(SelectedFile::new("s.pdf", 1, "application/pdf"))
            .unwrap();
        tokio::task::yield_now().await;
        assert!(c.drain_completions().is_empty());
        assert!(c.state().is_parsing());
    }
}
