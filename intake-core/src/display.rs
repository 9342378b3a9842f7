//! What the screen shows, derived from `IntakeState` with no side effects.

use crate::lifecycle::{IntakeState, Lifecycle};
use crate::result::ParseResult;

pub const UPLOAD_CALL_TO_ACTION: &str = "Click to upload PDF statement";
pub const LOADING_MESSAGE: &str = "Parsing your statement...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPrompt {
    /// Selected file name, or the generic call-to-action.
    pub title: String,
    pub hint: String,
}

/// The one panel below the upload prompt. Being a single enum, the error,
/// loading and result panels can never be shown together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Empty,
    Error(String),
    Loading,
    Result(ParseResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub upload_prompt: UploadPrompt,
    pub panel: Panel,
}

impl DisplayState {
    pub fn derive(state: &IntakeState) -> Self {
        let title = state
            .selected_file()
            .map(|f| f.name.clone())
            .unwrap_or_else(|| UPLOAD_CALL_TO_ACTION.to_string());

        // Having a result and not parsing are the same state here.
        let panel = match state.lifecycle() {
            Lifecycle::Idle => Panel::Empty,
            Lifecycle::Parsing => Panel::Loading,
            Lifecycle::Failed(err) => Panel::Error(err.to_string()),
            Lifecycle::Succeeded(result) => Panel::Result(result.clone()),
        };

        Self {
            upload_prompt: UploadPrompt {
                title,
                hint: state.settings().size_limit.hint(),
            },
            panel,
        }
    }

    pub fn shows_error(&self) -> bool {
        matches!(self.panel, Panel::Error(_))
    }

    pub fn shows_loading(&self) -> bool {
        matches!(self.panel, Panel::Loading)
    }

    pub fn shows_result(&self) -> bool {
        matches!(self.panel, Panel::Result(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.panel {
            Panel::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ParseResult> {
        match &self.panel {
            Panel::Result(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SelectedFile;

    fn visible_panels(d: &DisplayState) -> usize {
        [d.shows_error(), d.shows_loading(), d.shows_result()]
            .iter()
            .filter(|b| **b)
            .count()
    }

    #[test]
    fn test_idle_shows_call_to_action() {
        let d = IntakeState::default().display();
        assert_eq!(d.upload_prompt.title, "Click to upload PDF statement");
        assert_eq!(d.upload_prompt.hint, "PDF files only • Max 10MB");
        assert_eq!(d.panel, Panel::Empty);
    }

    #[test]
    fn test_parsing_shows_file_name_and_loading() {
        let mut state = IntakeState::default();
        state
            .select_file(SelectedFile::new("statement.pdf", 1331, "application/pdf"))
            .unwrap();
        let d = state.display();
        assert_eq!(d.upload_prompt.title, "statement.pdf");
        assert!(d.shows_loading());
        assert_eq!(visible_panels(&d), 1);
    }

    #[test]
    fn test_rejection_shows_error_only() {
        let mut state = IntakeState::default();
        let _ = state.select_file(SelectedFile::new("photo.png", 5, "image/png"));
        let d = state.display();
        assert_eq!(d.upload_prompt.title, "Click to upload PDF statement");
        assert_eq!(d.error_message(), Some("Please select a valid PDF file"));
        assert!(!d.shows_loading());
        assert_eq!(visible_panels(&d), 1);
    }
}
