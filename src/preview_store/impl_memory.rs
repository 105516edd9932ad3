use crate::library::logger::interface::Logger;
use crate::preview_store::interface::{Preview, PreviewStore};
use crate::selected_image::SelectedImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct PreviewStoreMemory {
    logger: Arc<dyn Logger + Send + Sync>,
    previews: Mutex<HashMap<Preview, SelectedImage>>,
}

impl PreviewStoreMemory {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("preview_store"),
            previews: Mutex::new(HashMap::new()),
        }
    }

    fn previews(&self) -> MutexGuard<'_, HashMap<Preview, SelectedImage>> {
        self.previews
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreviewStore for PreviewStoreMemory {
    fn register(
        &self,
        preview: Preview,
        image: &SelectedImage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut previews = self.previews();
        if previews.contains_key(&preview) {
            return Err(format!("{} is already registered", preview).into());
        }
        previews.insert(preview, image.clone());
        self.logger
            .info(&format!("Registered {} for {}", preview, image.name))?;
        Ok(())
    }

    fn release(&self, preview: Preview) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.previews().remove(&preview) {
            Some(image) => {
                self.logger
                    .info(&format!("Released {} for {}", preview, image.name))?;
                Ok(())
            }
            None => Err(format!("{} is not registered", preview).into()),
        }
    }

    fn resolve(&self, preview: Preview) -> Option<SelectedImage> {
        self.previews().get(&preview).cloned()
    }

    fn live_count(&self) -> usize {
        self.previews().len()
    }
}
