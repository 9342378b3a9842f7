//! Parse-lifecycle state machine.
//!
//! ```text
//! Idle --select(pdf)--> Parsing --completion--> Succeeded
//! Idle/Parsing/Succeeded --select(non-pdf)--> Failed
//! Failed/Succeeded --select(pdf)--> Parsing
//! ```
//!
//! Every state is re-enterable through `select_file`. Extraction itself happens
//! elsewhere; this module only hands out tickets and applies completions.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::display::DisplayState;
use crate::error::IntakeError;
use crate::file::{SelectedFile, SizeLimit};
use crate::result::ParseResult;

/// What to do with a completion that belongs to an older selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Apply every completion in the order it resolves. Two overlapping
    /// extractions race; whichever resolves last is what stays on screen.
    #[default]
    LastResolvedWins,
    /// Only the completion for the most recent selection is applied.
    LatestSelectionWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntakeSettings {
    pub size_limit: SizeLimit,
    pub completion_policy: CompletionPolicy,
}

/// Issued for each accepted selection; returned with the extraction outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtractionTicket {
    generation: u64,
}

impl ExtractionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Idle,
    Parsing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Parsing,
    Succeeded(ParseResult),
    Failed(IntakeError),
}

impl Lifecycle {
    pub fn phase(&self) -> LifecyclePhase {
        match self {
            Lifecycle::Idle => LifecyclePhase::Idle,
            Lifecycle::Parsing => LifecyclePhase::Parsing,
            Lifecycle::Succeeded(_) => LifecyclePhase::Succeeded,
            Lifecycle::Failed(_) => LifecyclePhase::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDisposition {
    Applied,
    /// Dropped under `LatestSelectionWins` because a newer selection exists.
    DiscardedStale,
}

/// The single owned intake state record.
#[derive(Debug, Clone, Default)]
pub struct IntakeState {
    settings: IntakeSettings,
    lifecycle: Lifecycle,
    selected: Option<SelectedFile>,
    /// Bumped on every selection attempt, accepted or not.
    generation: u64,
}

impl IntakeState {
    pub fn new(settings: IntakeSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_parsing(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Parsing)
    }

    pub fn error(&self) -> Option<&IntakeError> {
        match &self.lifecycle {
            Lifecycle::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ParseResult> {
        match &self.lifecycle {
            Lifecycle::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::derive(self)
    }

    /// Validate a candidate and, if accepted, move to `Parsing`.
    ///
    /// The caller must start exactly one extraction per returned ticket.
    pub fn select_file(&mut self, candidate: SelectedFile) -> Result<ExtractionTicket, IntakeError> {
        self.generation += 1;

        if let Err(err) = self.validate(&candidate) {
            warn!(
                file = %candidate.name,
                mime_type = %candidate.mime_type,
                size_bytes = candidate.size_bytes,
                error = %err,
                "rejected selection"
            );
            self.selected = None;
            self.lifecycle = Lifecycle::Failed(err.clone());
            return Err(err);
        }

        info!(
            file = %candidate.name,
            size_bytes = candidate.size_bytes,
            generation = self.generation,
            "accepted selection"
        );
        self.selected = Some(candidate);
        self.lifecycle = Lifecycle::Parsing;
        Ok(ExtractionTicket {
            generation: self.generation,
        })
    }

    /// Apply the outcome of the extraction started for `ticket`.
    pub fn complete(
        &mut self,
        ticket: ExtractionTicket,
        outcome: Result<ParseResult, IntakeError>,
    ) -> CompletionDisposition {
        if self.settings.completion_policy == CompletionPolicy::LatestSelectionWins
            && ticket.generation != self.generation
        {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarded stale completion"
            );
            return CompletionDisposition::DiscardedStale;
        }

        self.lifecycle = match outcome {
            Ok(result) => {
                info!(
                    generation = ticket.generation,
                    issuer = %result.issuer,
                    file = %result.file_name,
                    "extraction applied"
                );
                Lifecycle::Succeeded(result)
            }
            Err(err) => {
                warn!(generation = ticket.generation, error = %err, "extraction failed");
                Lifecycle::Failed(err)
            }
        };
        CompletionDisposition::Applied
    }

    fn validate(&self, candidate: &SelectedFile) -> Result<(), IntakeError> {
        if !candidate.is_pdf() {
            return Err(IntakeError::InvalidFileType {
                mime_type: candidate.mime_type.clone(),
            });
        }
        let limit = self.settings.size_limit;
        if limit.rejects(candidate.size_bytes) {
            return Err(IntakeError::FileTooLarge {
                size_bytes: candidate.size_bytes,
                limit_bytes: limit.max_bytes,
                limit_label: limit.label(),
            });
        }
        Ok(())
    }
}
