//! Download payloads handed to the page.

/// Prefix prepended to the original file name for downloads.
pub const DOWNLOAD_PREFIX: &str = "compressed_";

/// Name a compressed file is saved under.
///
/// The original extension is kept, even when the payload is JPEG and the
/// source was PNG.
pub fn download_name(original_name: &str) -> String {
    format!("{DOWNLOAD_PREFIX}{original_name}")
}

/// A finished file ready to be handed to the browser's download machinery.
///
/// Owns its bytes; whoever turns it into a temporary URL is responsible for
/// releasing that URL once the download has been triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_name() {
        assert_eq!(download_name("photo.jpg"), "compressed_photo.jpg");
        assert_eq!(download_name("scan.png"), "compressed_scan.png");
        assert_eq!(download_name(""), "compressed_");
    }
}
