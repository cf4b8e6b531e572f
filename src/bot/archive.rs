//! Rotating on-disk archive of accepted captures

use super::error::BotResult;
use std::path::PathBuf;

/// Keeps the last `max_count` captures as `screenshotN.png`, evicting the
/// lowest numbers first. Numbering continues from the highest index on disk,
/// so a restart never overwrites what the previous run left behind.
pub struct ScreenshotArchive {
    directory: PathBuf,
    max_count: usize,
}

impl ScreenshotArchive {
    pub fn new(directory: impl Into<PathBuf>, max_count: usize) -> Self {
        Self {
            directory: directory.into(),
            max_count,
        }
    }

    /// Archived captures sorted by index, lowest first.
    async fn numbered(&self) -> BotResult<Vec<(u32, PathBuf)>> {
        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|s| s.to_str())
                && let Some(index) = parse_index(name)
            {
                found.push((index, path));
            }
        }
        found.sort_by_key(|(index, _)| *index);
        Ok(found)
    }

    /// Write `png` as the next archived capture and return its path.
    pub async fn save(&self, png: &[u8]) -> BotResult<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let mut existing = self.numbered().await?;
        let next = existing.last().map(|(index, _)| index + 1).unwrap_or(1);
        while existing.len() >= self.max_count && !existing.is_empty() {
            let (index, path) = existing.remove(0);
            log::debug!("Evicting archived capture screenshot{index}.png");
            tokio::fs::remove_file(&path).await?;
        }

        let path = self.directory.join(format!("screenshot{next}.png"));
        tokio::fs::write(&path, png).await?;
        Ok(path)
    }
}

fn parse_index(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("screenshot")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}
