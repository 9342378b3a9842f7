//! intake-ingest: the statement extraction capability and the async intake controller.

pub mod controller;
pub mod extractor;
pub mod stub;

pub use controller::{Completion, IntakeController};
pub use extractor::{ExtractError, Extractor};
pub use stub::{DEFAULT_STUB_DELAY, StubExtractor, sample_result};
