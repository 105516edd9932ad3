use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file the user picked, held in memory until the session lets go of it.
#[derive(Clone, PartialEq)]
pub struct SelectedImage {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_for_name(&name);
        Ok(Self::new(name, mime, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type guessed from the file extension, the way a browser labels a picked file.
pub fn mime_for_name(name: &str) -> String {
    if let Ok(format) = ImageFormat::from_path(name) {
        return format.to_mime_type().to_string();
    }

    let extension = Path::new(name)
        .extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("svg") => "image/svg+xml",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MIME,
    }
    .to_string()
}
