//! Input handles and batch admission.

use thiserror::Error;

use crate::decode::InputFormat;

/// Anything that can hand the pipeline a named chunk of image bytes.
pub trait ImageSource {
    /// Original file name, used to label results and downloads.
    fn name(&self) -> &str;

    /// MIME type declared by whoever produced the handle. May be empty.
    fn mime_type(&self) -> &str;

    /// Raw file contents.
    fn bytes(&self) -> &[u8];

    /// Size of the raw file in bytes.
    fn byte_size(&self) -> u64 {
        self.bytes().len() as u64
    }
}

/// An in-memory file picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl ImageSource for FileHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Batch-level errors. These reject the whole batch before any work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// More files were submitted than the pipeline accepts at once.
    #[error("Please select a maximum of {max} files.")]
    TooLarge { count: usize, max: usize },
}

/// Accept a batch only if it holds at most `max_files` entries.
///
/// There is no partial acceptance: an oversized batch is rejected whole.
pub fn select_batch<S>(files: Vec<S>, max_files: usize) -> Result<Vec<S>, BatchError> {
    if files.len() > max_files {
        return Err(BatchError::TooLarge {
            count: files.len(),
            max: max_files,
        });
    }
    Ok(files)
}

/// Whether a declared MIME type is one of the accepted raster types.
pub fn is_supported_mime(mime: &str) -> bool {
    InputFormat::from_mime(mime).is_some()
}

/// Keep only JPEG and PNG files, by declared MIME type.
///
/// Applied to drag-and-drop input, where the browser does not filter.
pub fn filter_dropped<S: ImageSource>(files: Vec<S>) -> Vec<S> {
    files
        .into_iter()
        .filter(|f| is_supported_mime(f.mime_type()))
        .collect()
}
