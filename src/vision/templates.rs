use std::collections::HashMap;
use std::path::Path;

use image::GrayImage;

use crate::errors::{PixelPlowError, PixelPlowResult};

/// Reference landmark bitmaps, keyed by file stem ("newspaper.png" →
/// "newspaper"). Templates are authored by cropping canonical-resolution
/// captures, so they are loaded as-is; only the live capture gets resized.
pub struct TemplateLibrary {
    templates: HashMap<String, GrayImage>,
}

impl TemplateLibrary {
    pub fn load(dir: &Path) -> PixelPlowResult<Self> {
        let mut templates = HashMap::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !matches!(ext, "png" | "jpg" | "jpeg" | "bmp") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let img = image::open(&path)?.to_luma8();
            tracing::debug!(id = stem, w = img.width(), h = img.height(), "template loaded");
            templates.insert(stem.to_string(), img);
        }

        if templates.is_empty() {
            return Err(PixelPlowError::Templates(format!(
                "no template images found in {}",
                dir.display()
            )));
        }

        tracing::info!(count = templates.len(), dir = %dir.display(), "template library ready");
        Ok(Self { templates })
    }

    #[cfg(test)]
    pub fn from_images(templates: HashMap<String, GrayImage>) -> Self {
        Self { templates }
    }

    pub fn get(&self, id: &str) -> PixelPlowResult<&GrayImage> {
        self.templates.get(id).ok_or_else(|| {
            PixelPlowError::Templates(format!("unknown template id '{id}'"))
        })
    }
}
