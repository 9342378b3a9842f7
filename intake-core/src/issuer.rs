//! Card issuers listed as supported. Informational only; results are never checked against it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issuer {
    AmericanExpress,
    Chase,
    Citibank,
    CapitalOne,
    Discover,
}

/// Display order of the supported-issuers list.
pub const SUPPORTED_ISSUERS: [Issuer; 5] = [
    Issuer::AmericanExpress,
    Issuer::Chase,
    Issuer::Citibank,
    Issuer::CapitalOne,
    Issuer::Discover,
];

impl Issuer {
    pub fn label(&self) -> &'static str {
        match self {
            Issuer::AmericanExpress => "American Express",
            Issuer::Chase => "Chase",
            Issuer::Citibank => "Citibank",
            Issuer::CapitalOne => "Capital One",
            Issuer::Discover => "Discover",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        SUPPORTED_ISSUERS
            .iter()
            .copied()
            .find(|i| i.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
