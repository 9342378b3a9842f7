//! intake-core: statement intake data model and the parse-lifecycle state machine

pub mod display;
pub mod error;
pub mod file;
pub mod issuer;
pub mod lifecycle;
pub mod result;

pub use display::{DisplayState, LOADING_MESSAGE, Panel, UPLOAD_CALL_TO_ACTION, UploadPrompt};
pub use error::IntakeError;
pub use file::{PDF_MIME_TYPE, SelectedFile, SizeLimit, format_file_size};
pub use issuer::{Issuer, SUPPORTED_ISSUERS};
pub use lifecycle::{
    CompletionDisposition, CompletionPolicy, ExtractionTicket, IntakeSettings, IntakeState,
    Lifecycle, LifecyclePhase,
};
pub use result::{DataPoint, DataPointKind, ParseResult};
