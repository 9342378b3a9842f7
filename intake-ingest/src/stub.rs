//! Fixed-delay stand-in extractor.
//!
//! Always succeeds after `delay` with the same sample values. The file bytes are
//! never read; only the name and size are carried into the result.

use async_trait::async_trait;
use intake_core::{ParseResult, SelectedFile};
use std::time::Duration;

use crate::extractor::{ExtractError, Extractor};

pub const DEFAULT_STUB_DELAY: Duration = Duration::from_millis(2000);

/// The sample statement every stub extraction returns, annotated with `file`.
pub fn sample_result(file: &SelectedFile) -> ParseResult {
    ParseResult {
        issuer: "Chase".to_string(),
        file_name: file.name.clone(),
        file_size_display: file.size_display(),
        card_last_four: "1234".to_string(),
        billing_cycle: "01/10/2025 - 31/10/2025".to_string(),
        payment_due_date: "05/11/2025".to_string(),
        total_balance: "$1,234.56".to_string(),
        minimum_payment: "$56.78".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct StubExtractor {
    delay: Duration,
}

impl Default for StubExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_STUB_DELAY)
    }
}

impl StubExtractor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Extractor for StubExtractor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn extract(&self, file: &SelectedFile) -> Result<ParseResult, ExtractError> {
        tokio::time::sleep(self.delay).await;
        Ok(sample_result(file))
    }
}
