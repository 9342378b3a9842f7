//! The file a user hands to the intake controller, plus the upload size limit.

use serde::{Deserialize, Serialize};

/// The only declared type the controller accepts.
pub const PDF_MIME_TYPE: &str = "application/pdf";

const MIB: u64 = 1024 * 1024;

/// A candidate or accepted statement file.
///
/// Only the metadata declared at selection time is kept; the bytes are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    /// Client-declared MIME type (not sniffed from content).
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME_TYPE
    }

    pub fn size_display(&self) -> String {
        format_file_size(self.size_bytes)
    }
}

/// Format a byte count as kilobytes with exactly two decimals, e.g. `2048` -> `"2.00 KB"`.
///
/// Ties round up (`128` bytes is `0.125` KB -> `"0.13 KB"`), computed in integer
/// hundredths so no float rounding mode is involved.
pub fn format_file_size(size_bytes: u64) -> String {
    let hundredths = (u128::from(size_bytes) * 100 + 512) / 1024;
    format!("{}.{:02} KB", hundredths / 100, hundredths % 100)
}

/// Advertised upload limit. Advisory unless `enforced` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimit {
    pub max_bytes: u64,
    pub enforced: bool,
}

impl Default for SizeLimit {
    fn default() -> Self {
        Self {
            max_bytes: 10 * MIB,
            enforced: false,
        }
    }
}

impl SizeLimit {
    /// True when the limit is enforced and `size_bytes` exceeds it.
    pub fn rejects(&self, size_bytes: u64) -> bool {
        self.enforced && size_bytes > self.max_bytes
    }

    /// Human label for the limit, e.g. `"10MB"`.
    pub fn label(&self) -> String {
        if self.max_bytes % MIB == 0 {
            format!("{}MB", self.max_bytes / MIB)
        } else {
            format!("{:.1}MB", self.max_bytes as f64 / MIB as f64)
        }
    }

    /// Upload prompt hint line.
    pub fn hint(&self) -> String {
        format!("PDF files only • Max {}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_exact() {
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(0), "0.00 KB");
        assert_eq!(format_file_size(1024 * 1024), "1024.00 KB");
    }

    #[test]
    fn test_format_file_size_rounds_to_two_places() {
        // 1331 / 1024 = 1.2998...
        assert_eq!(format_file_size(1331), "1.30 KB");
        // 1000 / 1024 = 0.9765...
        assert_eq!(format_file_size(1000), "0.98 KB");
        // 0.125 is an exact tie
        assert_eq!(format_file_size(128), "0.13 KB");
    }

    #[test]
    fn test_is_pdf_is_exact_match() {
        assert!(SelectedFile::new("a.pdf", 1, "application/pdf").is_pdf());
        assert!(!SelectedFile::new("a.png", 1, "image/png").is_pdf());
        assert!(!SelectedFile::new("a.pdf", 1, "APPLICATION/PDF").is_pdf());
        assert!(!SelectedFile::new("a.pdf", 1, "").is_pdf());
    }

    #[test]
    fn test_size_limit_default_is_advisory() {
        let limit = SizeLimit::default();
        assert_eq!(limit.max_bytes, 10 * 1024 * 1024);
        assert!(!limit.rejects(u64::MAX));
        assert_eq!(limit.hint(), "PDF files only • Max 10MB");
    }

    #[test]
    fn test_size_limit_enforced() {
        let limit = SizeLimit {
            max_bytes: 1024,
            enforced: true,
        };
        assert!(!limit.rejects(1024));
        assert!(limit.rejects(1025));

        let fractional = SizeLimit {
            max_bytes: 3 * MIB / 2,
            enforced: false,
        };
        assert_eq!(fractional.label(), "1.5MB");
    }
}
