//! Backing store: one text file holding the statistics table followed by
//! the match history.
//!
//! Every rewrite goes through a temporary file in the same directory that
//! is renamed over the store once fully written, so a crash mid-write
//! leaves the previous contents intact.

use crate::history::{HISTORY_HEADER, MatchRecord};
use crate::stats::StatsTable;
use crate::StoreError;
use derive_getters::Getters;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// Raw sections of an existing store file.
///
/// The file is handled as bytes: only the statistics section is decoded,
/// and the history section is carried through rewrites unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoreContents {
    /// Everything before the history header line, lossily decoded.
    statistics: String,
    /// The history header line and everything after it, as stored.
    history: Option<Vec<u8>>,
}

impl StoreContents {
    /// Splits file bytes at the line holding the history header.
    pub fn parse(bytes: &[u8]) -> Self {
        match history_offset(bytes) {
            Some(offset) => Self {
                statistics: String::from_utf8_lossy(&bytes[..offset]).into_owned(),
                history: Some(bytes[offset..].to_vec()),
            },
            None => Self {
                statistics: String::from_utf8_lossy(bytes).into_owned(),
                history: None,
            },
        }
    }

    /// History section decoded for display. Invalid bytes show as U+FFFD.
    pub fn history_text(&self) -> Option<String> {
        self.history
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Byte offset of the start of the first line containing the history header.
fn history_offset(bytes: &[u8]) -> Option<usize> {
    let header = HISTORY_HEADER.as_bytes();
    let mut offset = 0;
    for line in bytes.split_inclusive(|&b| b == b'\n') {
        if line.windows(header.len()).any(|window| window == header) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Handle to the store file. Cheap to clone; holds only the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingStore {
    path: PathBuf,
}

impl BackingStore {
    /// Creates a handle for the file at `path`. Nothing is read or created.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file as bytes. Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read_raw(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), "Store read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file absent");
                Ok(None)
            }
            Err(e) => Err(StoreError::new(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Reads and splits the file into its two sections.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read.
    pub fn load_all(&self) -> Result<Option<StoreContents>, StoreError> {
        Ok(self.read_raw()?.map(|bytes| StoreContents::parse(&bytes)))
    }

    /// Regenerates the statistics section, keeping the history section
    /// byte-for-byte. Creates an empty history section when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or replaced.
    #[instrument(skip(self, table), fields(path = %self.path.display()))]
    pub fn replace_statistics(&self, table: &StatsTable) -> Result<(), StoreError> {
        let history = self.load_all()?.and_then(|contents| contents.history);

        let mut bytes = table.render().into_bytes();
        bytes.push(b'\n');
        match history {
            Some(history) => bytes.extend_from_slice(&history),
            None => {
                bytes.extend_from_slice(HISTORY_HEADER.as_bytes());
                bytes.push(b'\n');
            }
        }

        self.write_atomic(&bytes)?;
        info!("Statistics section written");
        Ok(())
    }

    /// Appends one history block after every existing block.
    ///
    /// A missing store is created with a zeroed statistics table first; a
    /// store without a history header gets one before the block.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or replaced.
    #[instrument(skip(self, record), fields(path = %self.path.display(), winner = %record.winner()))]
    pub fn append_history(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let mut bytes = match self.read_raw()? {
            Some(mut bytes) => {
                if bytes.last().is_some_and(|&b| b != b'\n') {
                    bytes.push(b'\n');
                }
                if history_offset(&bytes).is_none() {
                    if !bytes.is_empty() {
                        bytes.push(b'\n');
                    }
                    bytes.extend_from_slice(HISTORY_HEADER.as_bytes());
                    bytes.push(b'\n');
                }
                bytes
            }
            None => {
                let mut bytes = StatsTable::new().render().into_bytes();
                bytes.push(b'\n');
                bytes.extend_from_slice(HISTORY_HEADER.as_bytes());
                bytes.push(b'\n');
                bytes
            }
        };

        bytes.extend_from_slice(record.to_block().as_bytes());
        self.write_atomic(&bytes)?;
        info!("History block appended");
        Ok(())
    }

    /// Writes `contents` to a sibling temporary file and renames it over
    /// the store.
    #[instrument(skip(self, contents), fields(bytes = contents.len()))]
    fn write_atomic(&self, contents: &[u8]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
            StoreError::new(format!(
                "Unable to create temporary file in '{}': {}",
                dir.display(),
                e
            ))
        })?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        debug!(path = %self.path.display(), "Store replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_at_header_line() {
        let bytes = b"=== GAME STATISTICS ===\nrow\n\n=== MATCH HISTORY ===\nblock\n";
        let contents = StoreContents::parse(bytes);
        assert_eq!(contents.statistics(), "=== GAME STATISTICS ===\nrow\n\n");
        assert_eq!(
            contents.history().as_deref(),
            Some(&b"=== MATCH HISTORY ===\nblock\n"[..])
        );
    }

    #[test]
    fn test_parse_without_history() {
        let contents = StoreContents::parse(b"=== GAME STATISTICS ===\n");
        assert_eq!(contents.history(), &None);
        assert_eq!(contents.history_text(), None);
    }

    #[test]
    fn test_parse_keeps_invalid_history_bytes() {
        let bytes = b"=== GAME STATISTICS ===\n\n=== MATCH HISTORY ===\nDate & Time: \xff\n";
        let contents = StoreContents::parse(bytes);
        assert_eq!(
            contents.history().as_deref(),
            Some(&b"=== MATCH HISTORY ===\nDate & Time: \xff\n"[..])
        );
        assert_eq!(
            contents.history_text().as_deref(),
            Some("=== MATCH HISTORY ===\nDate & Time: \u{FFFD}\n")
        );
    }

    #[test]
    fn test_history_offset_first_line() {
        assert_eq!(history_offset(b"=== MATCH HISTORY ===\n"), Some(0));
        assert_eq!(history_offset(b"a\n=== MATCH HISTORY ==="), Some(2));
        assert_eq!(history_offset(b""), None);
    }
}
