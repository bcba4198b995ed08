//! Folder reader.
//!
//! A folder is a queue of documents of one target type. Every file is
//! parsed, bound, and then consumed (deleted) before the next one is
//! touched, so the files left on disk are exactly the ones not yet
//! produced. Nothing is rolled back on failure.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::bind::FromNode;
use crate::convert::Converters;
use crate::document::YamlParser;
use crate::error::{Error, Result};

impl<T: FromNode> YamlParser<T> {
    /// Parse and consume every file of `dir` before returning.
    ///
    /// The first failure aborts the call. Files consumed before it stay
    /// consumed; the failing file and the ones after it are left in place.
    pub fn parse_folder_eager(&self, dir: impl AsRef<Path>) -> Result<Vec<T>> {
        let dir = dir.as_ref();
        let files = list_documents(dir)?;
        debug!(dir = %dir.display(), files = files.len(), "parsing folder");

        files
            .iter()
            .map(|path| consume(path, &self.converters))
            .collect()
    }

    /// Parse and consume one file of `dir` per call to `next`.
    ///
    /// The directory is listed once, here. Files not yet requested stay
    /// untouched.
    pub fn parse_folder_lazy(&self, dir: impl AsRef<Path>) -> Result<FolderSequence<T>> {
        let dir = dir.as_ref();
        let files = list_documents(dir)?;
        debug!(dir = %dir.display(), files = files.len(), "opened folder cursor");

        Ok(FolderSequence {
            files: files.into_iter(),
            converters: self.converters.clone(),
            failed: false,
            _target: PhantomData,
        })
    }
}

/// Lazy cursor over the documents of a folder.
///
/// Each call to `next` reads, binds and deletes one file. After a failed
/// file the cursor is exhausted.
pub struct FolderSequence<T> {
    files: std::vec::IntoIter<PathBuf>,
    converters: Arc<Converters>,
    failed: bool,
    _target: PhantomData<fn() -> T>,
}

impl<T: FromNode> FolderSequence<T> {
    /// Returns `true` if another file is waiting.
    pub fn has_next(&self) -> bool {
        !self.failed && self.files.len() > 0
    }

    /// Files listed but not yet consumed.
    pub fn remaining(&self) -> &[PathBuf] {
        if self.failed {
            &[]
        } else {
            self.files.as_slice()
        }
    }
}

impl<T: FromNode> Iterator for FolderSequence<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let path = self.files.next()?;
        let result = consume(&path, &self.converters);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining().len()))
    }
}

/// Regular files of `dir`, sorted by path.
fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::file(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::file(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::file(entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    Ok(files)
}

/// Read, bind and delete one document file.
fn consume<T: FromNode>(path: &Path, converters: &Converters) -> Result<T> {
    // The handle is closed once the text is read
    let text = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;

    let filename = path.display().to_string();
    let value = match crate::parse_with_filename(&text, Some(&filename))
        .and_then(|node| T::from_node(&node, converters))
    {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %filename, error = %err, "document left in place");
            return Err(err);
        }
    };

    fs::remove_file(path).map_err(|e| Error::file(path, e))?;
    debug!(path = %filename, "consumed document");

    Ok(value)
}
