//! Template loading and the immutable library the matcher runs against

use super::error::{BotError, BotResult};
use image::GrayImage;
use std::path::Path;
use std::sync::Arc;

/// One reference image. The name is the PNG file stem and carries the
/// semantic category through its prefix (`ingame_`, `forfeit`, `reward_`, ...).
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    image: GrayImage,
}

impl Template {
    pub fn from_image(name: impl Into<String>, image: GrayImage) -> BotResult<Self> {
        let name = name.into();
        if image.width() == 0 || image.height() == 0 {
            return Err(BotError::InvalidImage {
                reason: format!("template '{name}' has zero width or height"),
            });
        }
        Ok(Self { name, image })
    }

    pub fn from_file(path: &Path) -> BotResult<Self> {
        let image = image::open(path).map_err(|e| BotError::TemplateLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self::from_image(name, image.to_luma8())
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Forfeit cues get a stricter acceptance gate in the aggregator.
    pub fn is_forfeit(&self) -> bool {
        self.name.starts_with("forfeit")
    }
}

/// Immutable set of templates, loaded once at startup.
pub struct TemplateLibrary {
    templates: Vec<Arc<Template>>,
}

impl TemplateLibrary {
    /// Scan `directory` for PNG files and load every one of them.
    ///
    /// A file that fails to load is an error, not a skip: a silently missing
    /// cue would leave the bot stuck on the screen that cue advances.
    pub fn load(directory: &Path) -> BotResult<Self> {
        if !directory.is_dir() {
            return Err(BotError::TemplateDirectory {
                path: directory.to_path_buf(),
            });
        }
        let entries = std::fs::read_dir(directory).map_err(|_| BotError::TemplateDirectory {
            path: directory.to_path_buf(),
        })?;

        let mut paths = Vec::new();
        for entry in entries.flatten() {
            if let Some(file_name) = entry.file_name().to_str()
                && file_name.ends_with(".png")
                && entry.path().is_file()
            {
                paths.push(entry.path());
            }
        }
        // Sort for consistent ordering
        paths.sort();

        if paths.is_empty() {
            return Err(BotError::NoTemplates {
                path: directory.to_path_buf(),
            });
        }

        let mut templates = Vec::with_capacity(paths.len());
        for path in &paths {
            let template = Template::from_file(path)?;
            log::debug!(
                "Loaded template '{}' ({}x{})",
                template.name,
                template.width(),
                template.height()
            );
            templates.push(template);
        }
        Self::from_templates(templates)
    }

    /// Build a library from already-loaded templates, enforcing unique names.
    pub fn from_templates(templates: Vec<Template>) -> BotResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for template in &templates {
            if !seen.insert(template.name.clone()) {
                return Err(BotError::DuplicateTemplate {
                    name: template.name.clone(),
                });
            }
        }
        Ok(Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn templates(&self) -> &[Arc<Template>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Template>> {
        self.templates.iter().find(|t| t.name == name)
    }
}
