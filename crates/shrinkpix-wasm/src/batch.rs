//! Collecting picked or dropped files into a batch.
//!
//! # Example
//!
//! ```typescript
//! const batch = new JsImageBatch();
//! for (const file of event.dataTransfer.files) {
//!   batch.add_dropped(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! }
//! ```

use shrinkpix_core::{is_supported_mime, FileHandle};
use wasm_bindgen::prelude::*;

/// Files submitted together in one selection or drop.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsImageBatch {
    files: Vec<FileHandle>,
}

#[wasm_bindgen]
impl JsImageBatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsImageBatch {
        JsImageBatch::default()
    }

    /// Add a file from the file picker. The picker already restricts types,
    /// so nothing is filtered here.
    pub fn add(&mut self, name: String, mime_type: String, bytes: Vec<u8>) {
        self.files.push(FileHandle::new(name, mime_type, bytes));
    }

    /// Add a dropped file if it is a JPEG or PNG.
    ///
    /// Returns `false` (and skips the file) for any other declared type.
    pub fn add_dropped(&mut self, name: String, mime_type: String, bytes: Vec<u8>) -> bool {
        if !is_supported_mime(&mime_type) {
            log::debug!("ignoring dropped {name} ({mime_type})");
            return false;
        }
        self.add(name, mime_type, bytes);
        true
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

impl JsImageBatch {
    pub(crate) fn into_files(self) -> Vec<FileHandle> {
        self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_everything() {
        let mut batch = JsImageBatch::new();
        batch.add("a.gif".into(), "image/gif".into(), vec![1]);
        batch.add("b.jpg".into(), "image/jpeg".into(), vec![2]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_add_dropped_filters_types() {
        let mut batch = JsImageBatch::new();
        assert!(batch.add_dropped("a.jpg".into(), "image/jpeg".into(), vec![]));
        assert!(batch.add_dropped("b.png".into(), "image/png".into(), vec![]));
        assert!(!batch.add_dropped("c.webp".into(), "image/webp".into(), vec![]));
        assert!(!batch.add_dropped("d.txt".into(), "text/plain".into(), vec![]));

        let names: Vec<String> = batch.into_files().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_clear() {
        let mut batch = JsImageBatch::new();
        batch.add("a.jpg".into(), "image/jpeg".into(), vec![]);
        batch.clear();
        assert!(batch.is_empty());
    }
}
