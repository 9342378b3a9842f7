//! Extracted statement fields, as shown in the result panel.

use serde::{Deserialize, Serialize};

use crate::issuer::Issuer;

/// Output of one extraction. Replaced wholesale, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Free text; not required to be one of the supported issuers.
    pub issuer: String,
    pub file_name: String,
    /// e.g. "1.30 KB"
    pub file_size_display: String,
    pub card_last_four: String,
    /// Free-form date range, e.g. "01/10/2025 - 31/10/2025".
    pub billing_cycle: String,
    pub payment_due_date: String,
    /// Currency strings keep their symbol and grouping ("$1,234.56").
    pub total_balance: String,
    pub minimum_payment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataPointKind {
    CardLastFour,
    BillingCycle,
    PaymentDueDate,
    TotalBalance,
    MinimumPayment,
}

impl DataPointKind {
    pub fn label(&self) -> &'static str {
        match self {
            DataPointKind::CardLastFour => "Card Last 4 Digits",
            DataPointKind::BillingCycle => "Billing Cycle",
            DataPointKind::PaymentDueDate => "Payment Due Date",
            DataPointKind::TotalBalance => "Total Balance",
            DataPointKind::MinimumPayment => "Minimum Payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPoint<'a> {
    pub kind: DataPointKind,
    pub value: &'a str,
}

impl DataPoint<'_> {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl ParseResult {
    /// "`file_name` • `file_size_display`"
    pub fn subheading(&self) -> String {
        format!("{} • {}", self.file_name, self.file_size_display)
    }

    /// The data points in display order.
    pub fn data_points(&self) -> [DataPoint<'_>; 5] {
        [
            DataPoint {
                kind: DataPointKind::CardLastFour,
                value: &self.card_last_four,
            },
            DataPoint {
                kind: DataPointKind::BillingCycle,
                value: &self.billing_cycle,
            },
            DataPoint {
                kind: DataPointKind::PaymentDueDate,
                value: &self.payment_due_date,
            },
            DataPoint {
                kind: DataPointKind::TotalBalance,
                value: &self.total_balance,
            },
            DataPoint {
                kind: DataPointKind::MinimumPayment,
                value: &self.minimum_payment,
            },
        ]
    }

    pub fn known_issuer(&self) -> Option<Issuer> {
        Issuer::from_label(&self.issuer)
    }
}
