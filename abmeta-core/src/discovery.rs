//! Directory listing for the input directory.
//!
//! The listing is the only view of the input directory the rest of the
//! pipeline gets. Entry order is whatever the file system reports, which
//! matters for prefix-width inference (see [`crate::inference`]).

use crate::error::{CoreError, CoreResult};
use crate::external::FileSystem;

use std::path::Path;

/// Entry names of one directory, in file system order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    entries: Vec<String>,
}

impl DirectoryListing {
    /// Wraps `entries`, rejecting an empty listing for `dir`.
    pub fn new(dir: &Path, entries: Vec<String>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::EmptyDirectory(dir.to_path_buf()));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The first entry in listing order.
    pub fn first(&self) -> &str {
        // Non-empty by construction
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lists the entries of `input_dir`.
///
/// # Errors
///
/// * `CoreError::EmptyDirectory` - The directory has no entries, does not
///   exist, or cannot be read. These cases are not told apart.
pub fn list_directory<F: FileSystem>(fs: &F, input_dir: &Path) -> CoreResult<DirectoryListing> {
    let entries = fs.list_dir(input_dir).map_err(|e| {
        log::debug!("Listing {} failed: {}", input_dir.display(), e);
        CoreError::EmptyDirectory(input_dir.to_path_buf())
    })?;
    log::debug!("Listed {} entries in {}", entries.len(), input_dir.display());
    DirectoryListing::new(input_dir, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::StdFileSystem;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_listing_keeps_every_entry() -> CoreResult<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("001_Intro.mp3"))?;
        File::create(dir.path().join(".hidden"))?;
        std::fs::create_dir(dir.path().join("extras"))?;

        let listing = list_directory(&StdFileSystem, dir.path())?;
        let mut entries = listing.entries().to_vec();
        entries.sort();
        assert_eq!(entries, vec![".hidden", "001_Intro.mp3", "extras"]);
        Ok(())
    }

    #[test]
    fn test_empty_directory_is_fatal() -> CoreResult<()> {
        let dir = tempdir()?;
        let result = list_directory(&StdFileSystem, dir.path());
        assert!(matches!(result, Err(CoreError::EmptyDirectory(ref p)) if p == dir.path()));
        Ok(())
    }

    #[test]
    fn test_missing_directory_reports_as_empty() {
        let missing = PathBuf::from("surely_this_does_not_exist_42_abmeta");
        let result = list_directory(&StdFileSystem, &missing);
        assert!(matches!(result, Err(CoreError::EmptyDirectory(_))));
    }

    #[test]
    fn test_listing_order_is_preserved() -> CoreResult<()> {
        let entries = vec!["b".to_string(), "a".to_string()];
        let listing = DirectoryListing::new(Path::new("book"), entries)?;
        assert_eq!(listing.first(), "b");
        assert_eq!(listing.len(), 2);
        Ok(())
    }
}
