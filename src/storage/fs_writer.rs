// Filesystem book writer — one `<title>.txt` file per book under a root directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::traits::{artifact_body, BookWriter};
use crate::error::LibraryError;

pub struct FsBookWriter {
    root: PathBuf,
}

impl FsBookWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Path of the artifact written for `title`.
    ///
    /// The title must be a single plain file name, so the artifact always
    /// lands directly under the root.
    pub fn artifact_path(&self, title: &str) -> io::Result<PathBuf> {
        let mut components = Path::new(title).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name || title.contains(['/', '\\']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "title is not a plain file name",
            ));
        }
        Ok(self.root.join(format!("{}.txt", title)))
    }
}

#[async_trait]
impl BookWriter for FsBookWriter {
    async fn write_book(&self, title: &str) -> Result<(), LibraryError> {
        let io_error = |source: io::Error| LibraryError::Io {
            title: title.to_string(),
            source,
        };
        let path = self.artifact_path(title).map_err(io_error)?;
        tokio::fs::write(&path, artifact_body(title))
            .await
            .map_err(io_error)?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_book_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsBookWriter::new(dir.path());
        writer.write_book("Dune").await.unwrap();

        let body = std::fs::read_to_string(dir.path().join("Dune.txt")).unwrap();
        assert_eq!(body, "Book: Dune");
    }

    #[tokio::test]
    async fn test_write_book_missing_root_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsBookWriter::new(dir.path().join("missing"));
        let err = writer.write_book("Dune").await.unwrap_err();
        assert!(matches!(err, LibraryError::Io { .. }));
    }

    #[tokio::test]
    async fn test_write_book_stays_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Books");
        let writer = FsBookWriter::new(&root);
        writer.ensure_root().await.unwrap();

        let absolute = dir.path().join("abs_escape");
        let absolute = absolute.to_str().unwrap();
        for title in ["../escaped", absolute, "nested/name", "..", "."] {
            let err = writer.write_book(title).await.unwrap_err();
            assert!(
                matches!(&err, LibraryError::Io { source, .. } if source.kind() == io::ErrorKind::InvalidInput),
                "{:?} -> {:?}",
                title,
                err
            );
        }

        assert!(!dir.path().join("escaped.txt").exists());
        assert!(!dir.path().join("abs_escape.txt").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_artifact_path_plain_title() {
        let writer = FsBookWriter::new("/srv/Books");
        assert_eq!(
            writer.artifact_path("Book 1").unwrap(),
            PathBuf::from("/srv/Books/Book 1.txt")
        );
        assert!(writer.artifact_path("").is_err());
    }

    #[tokio::test]
    async fn test_ensure_root_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsBookWriter::new(dir.path().join("Books"));
        writer.ensure_root().await.unwrap();
        writer.ensure_root().await.unwrap();
        assert!(writer.root().is_dir());
    }
}
