use crate::selected_image::SelectedImage;
use std::fmt;

/// Local display handle for a selected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preview(pub u64);

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview#{}", self.0)
    }
}

pub trait PreviewStore: Send + Sync {
    fn register(
        &self,
        preview: Preview,
        image: &SelectedImage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn release(&self, preview: Preview) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn resolve(&self, preview: Preview) -> Option<SelectedImage>;
    fn live_count(&self) -> usize;
}
