//! Reading files from disk into [`SelectedFile`]s

use std::path::Path;

use upload_core::SelectedFile;

use crate::error::{Result, UploadClientError};

/// Read `path` into a [`SelectedFile`] named after the path's file name
///
/// The content type is guessed from the extension and left unset when the
/// extension is unknown.
pub async fn load_file(path: impl AsRef<Path>) -> Result<SelectedFile> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            UploadClientError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", path.display()),
            ))
        })?
        .to_string();

    let data = tokio::fs::read(path).await?;
    tracing::debug!(file_name = %file_name, size = data.len(), "Loaded file");

    let file = SelectedFile::new(file_name, data);
    Ok(match mime_guess::from_path(path).first() {
        Some(media_type) => file.with_content_type(media_type.essence_str()),
        None => file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_file_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello")
            .unwrap();

        let file = load_file(&path).await.unwrap();
        assert_eq!(file.file_name, "notes.txt");
        assert_eq!(&file.data[..], b"hello");
        assert_eq!(file.content_type.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_load_file_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("report.PDF");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        let unknown = dir.path().join("blob.zzqx");
        std::fs::write(&unknown, b"?").unwrap();

        let pdf = load_file(&pdf).await.unwrap();
        assert_eq!(pdf.content_type.as_deref(), Some("application/pdf"));

        let unknown = load_file(&unknown).await.unwrap();
        assert_eq!(unknown.content_type, None);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path().join("missing.bin")).await.unwrap_err();
        assert!(matches!(err, UploadClientError::IoError(_)));
    }
}
