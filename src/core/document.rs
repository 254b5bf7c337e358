use std::io;
use std::path::{Path, PathBuf};

/// The one document the server currently holds for this user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// A document read from disk, ready to be sent as multipart form data.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub handle: DocumentHandle,
    pub bytes: Vec<u8>,
}

impl DocumentHandle {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            size_bytes,
            path,
        }
    }

    /// Human-readable size for the sidebar, e.g. `12.4 KB`.
    pub fn size_label(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut size = self.size_bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} {}", self.size_bytes, UNITS[0])
        } else {
            format!("{:.1} {}", size, UNITS[unit])
        }
    }
}

impl DocumentUpload {
    pub async fn read(path: &Path) -> io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let bytes = tokio::fs::read(path).await?;
        Ok(Self {
            handle: DocumentHandle::new(path, bytes.len() as u64),
            bytes,
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expands a leading `~/` so pasted paths behave like they do in a shell.
pub fn expand_user_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn handle_name_is_the_file_name() {
        let handle = DocumentHandle::new("/tmp/notes/syllabus.pdf", 10);
        assert_eq!(handle.name, "syllabus.pdf");
    }

    #[test]
    fn size_labels_scale_units() {
        assert_eq!(DocumentHandle::new("a", 512).size_label(), "512 B");
        assert_eq!(DocumentHandle::new("a", 2048).size_label(), "2.0 KB");
        assert_eq!(
            DocumentHandle::new("a", 5 * 1024 * 1024).size_label(),
            "5.0 MB"
        );
    }

    #[test]
    fn expand_user_path_trims_whitespace() {
        assert_eq!(expand_user_path("  /tmp/a.pdf \n"), PathBuf::from("/tmp/a.pdf"));
    }

    #[tokio::test]
    async fn read_loads_bytes_and_handle() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("lecture.txt");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"photosynthesis").expect("write");

        let upload = DocumentUpload::read(&path).await.expect("read");
        assert_eq!(upload.bytes, b"photosynthesis");
        assert_eq!(upload.handle.name, "lecture.txt");
        assert_eq!(upload.handle.size_bytes, 14);
    }

    #[tokio::test]
    async fn read_rejects_directories() {
        let dir = TempDir::new().expect("temp dir");
        assert!(DocumentUpload::read(dir.path()).await.is_err());
    }
}
