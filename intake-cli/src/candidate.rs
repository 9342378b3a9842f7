//! Turn a path on disk into a selection candidate, the way a browser file picker would.

use anyhow::{Context, Result};
use intake_core::SelectedFile;
use std::path::Path;

/// Name and size come from the file system; the MIME type is `declared` if given,
/// otherwise guessed from the extension. The contents are not read.
pub fn from_path(path: &Path, declared: Option<&str>) -> Result<SelectedFile> {
    let meta = std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    if !meta.is_file() {
        anyhow::bail!("not a file: {}", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("no file name in {}", path.display()))?;

    let mime_type = match declared {
        Some(m) => m.trim().to_string(),
        None => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };

    Ok(SelectedFile::new(name, meta.len(), mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pdf_extension_guesses_pdf() {
        let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        f.write_all(&[0u8; 1331]).unwrap();

        let c = from_path(f.path(), None).unwrap();
        assert_eq!(c.mime_type, "application/pdf");
        assert_eq!(c.size_bytes, 1331);
        assert!(c.name.ends_with(".pdf"));
    }

    #[test]
    fn test_declared_type_wins() {
        let f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let c = from_path(f.path(), Some("image/png")).unwrap();
        assert_eq!(c.mime_type, "image/png");
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        let f = tempfile::Builder::new().suffix(".zzq").tempfile().unwrap();
        let c = from_path(f.path(), None).unwrap();
        assert_eq!(c.mime_type, "application/octet-stream");
        assert!(!c.is_pdf());
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(from_path(dir.path(), None).is_err());
    }
}
