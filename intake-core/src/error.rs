use thiserror::Error;

/// User-visible intake failures. The `Display` text is what the error panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Please select a valid PDF file")]
    InvalidFileType { mime_type: String },

    /// Only produced when the size limit is explicitly enforced.
    #[error("File exceeds the {limit_label} upload limit")]
    FileTooLarge {
        size_bytes: u64,
        limit_bytes: u64,
        limit_label: String,
    },

    #[error("Could not parse statement: {0}")]
    Extraction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_type_message_is_fixed() {
        let e = IntakeError::InvalidFileType {
            mime_type: "image/png".to_string(),
        };
        assert_eq!(e.to_string(), "Please select a valid PDF file");
    }

    #[test]
    fn test_too_large_message() {
        let e = IntakeError::FileTooLarge {
            size_bytes: 20,
            limit_bytes: 10,
            limit_label: "10MB".to_string(),
        };
        assert_eq!(e.to_string(), "File exceeds the 10MB upload limit");
    }
}
