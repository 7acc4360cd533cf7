use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const SUBMISSION_FILE: &str = "full-submission.txt";

/// Local tree of downloaded filings:
/// `<root>/<TICKER>/<form>/<accession>/full-submission.txt`.
#[derive(Debug, Clone)]
pub struct FilingStore {
    base_dir: PathBuf,
}

impl FilingStore {
    /// Creates a new FilingStore rooted at `base_dir` (created lazily on first save)
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self { base_dir: base_dir.as_ref().to_path_buf() }
    }

    /// Directory holding every accession for (ticker, form)
    pub fn form_dir(&self, ticker: &str, form_type: &str) -> PathBuf {
        self.base_dir
            .join(ticker.trim().to_uppercase())
            .join(path_safe(form_type))
    }

    pub fn submission_path(&self, ticker: &str, form_type: &str, accession: &str) -> PathBuf {
        self.form_dir(ticker, form_type)
            .join(accession)
            .join(SUBMISSION_FILE)
    }

    /// Writes a raw submission, creating directories as needed.
    pub fn save_submission(
        &self,
        ticker: &str,
        form_type: &str,
        accession: &str,
        content: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.submission_path(ticker, form_type, accession);
        if let Some(dir) = file_path.parent() {
            fs::create_dir_all(dir).map_err(StorageError::IoError)?;
        }

        fs::write(&file_path, content).map_err(StorageError::IoError)?;

        tracing::info!("Saved submission to {}", file_path.display());
        Ok(file_path)
    }

    /// Every stored submission for (ticker, form).
    pub fn list_submissions(&self, ticker: &str, form_type: &str) -> Result<Vec<PathBuf>, StorageError> {
        let form_dir = self.form_dir(ticker, form_type);
        if !form_dir.exists() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(&form_dir)? {
            let candidate = entry?.path().join(SUBMISSION_FILE);
            if candidate.is_file() {
                found.push(candidate);
            }
        }
        Ok(found)
    }

    /// The most recently created submission for (ticker, form), if any.
    pub fn newest_submission(&self, ticker: &str, form_type: &str) -> Result<Option<PathBuf>, StorageError> {
        newest_of(self.list_submissions(ticker, form_type)?)
    }

    /// Reads a submission, replacing invalid UTF-8 with U+FFFD.
    pub fn read_submission(&self, path: &Path) -> Result<String, StorageError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        if let std::borrow::Cow::Owned(_) = text {
            tracing::warn!("{} contained invalid UTF-8; decoded lossily", path.display());
        }
        Ok(text.into_owned())
    }
}

/// The most recently created of `paths`, if any.
pub fn newest_of<I>(paths: I) -> Result<Option<PathBuf>, StorageError>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for path in paths {
        let meta = fs::metadata(&path)?;
        // Not every filesystem records creation time.
        let stamp = meta.created().or_else(|_| meta.modified())?;
        if newest.as_ref().map_or(true, |(best, _)| stamp > *best) {
            newest = Some((stamp, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

// "10-K/A" must stay one path component.
fn path_safe(form_type: &str) -> String {
    form_type.trim().replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_submission_path_layout() {
        let store = FilingStore::new("/data");
        assert_eq!(
            store.submission_path("aapl", "10-K", "0000320193-23-000106"),
            PathBuf::from("/data/AAPL/10-K/0000320193-23-000106/full-submission.txt")
        );
        assert_eq!(
            store.form_dir("AAPL", "10-K/A"),
            PathBuf::from("/data/AAPL/10-K_A")
        );
    }

    #[test]
    fn test_empty_store_has_no_submissions() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilingStore::new(dir.path());
        assert!(store.list_submissions("AAPL", "10-K").unwrap().is_empty());
        assert!(store.newest_submission("AAPL", "10-K").unwrap().is_none());
    }

    #[test]
    fn test_newest_submission_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilingStore::new(dir.path());
        store.save_submission("MSFT", "10-Q", "older", b"old").unwrap();
        sleep(Duration::from_millis(50));
        let newer = store.save_submission("MSFT", "10-Q", "newer", b"new").unwrap();

        assert_eq!(store.list_submissions("MSFT", "10-Q").unwrap().len(), 2);
        assert_eq!(store.newest_submission("MSFT", "10-Q").unwrap(), Some(newer));
    }

    #[test]
    fn test_newest_of_only_considers_given_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilingStore::new(dir.path());
        let older = store.save_submission("ACME", "10-K", "fy2022", b"2022").unwrap();
        sleep(Duration::from_millis(50));
        let newer = store.save_submission("ACME", "10-K", "fy2024", b"2024").unwrap();

        assert_eq!(newest_of(vec![older.clone()]).unwrap(), Some(older.clone()));
        assert_eq!(newest_of(vec![older, newer.clone()]).unwrap(), Some(newer));
        assert_eq!(newest_of(Vec::new()).unwrap(), None);
    }

    #[test]
    fn test_directories_without_submission_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilingStore::new(dir.path());
        fs::create_dir_all(store.form_dir("KO", "10-K").join("partial")).unwrap();
        assert!(store.newest_submission("KO", "10-K").unwrap().is_none());
    }

    #[test]
    fn test_read_submission_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilingStore::new(dir.path());
        let path = store
            .save_submission("V", "10-K", "acc", b"Visa \xFF\xFE Inc")
            .unwrap();
        let text = store.read_submission(&path).unwrap();
        assert_eq!(text, "Visa \u{FFFD}\u{FFFD} Inc");
    }
}
