use anyhow::Context;
use radarcore::interface::FrameBuffer;
use std::fs;
use std::path::{Path, PathBuf};

const PREFIX: &str = "screenshot_";
const SUFFIX: &str = ".bin";

/// Numbered raw RGB565 dumps in a directory, capped at `limit` files.
pub struct ScreenshotStore {
    dir: PathBuf,
    count: usize,
    limit: usize,
}

impl ScreenshotStore {
    /// Resumes numbering after any screenshots already in `dir`.
    pub fn open<P: AsRef<Path>>(dir: P, limit: usize) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let count = count_existing(&dir);
        Self { dir, count, limit }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Writes `frame`; returns `Ok(None)` once the limit is reached.
    pub fn save(&mut self, frame: &FrameBuffer) -> anyhow::Result<Option<PathBuf>> {
        if self.count >= self.limit {
            log::info!(
                "screenshot limit reached ({}), delete files to free space",
                self.limit
            );
            return Ok(None);
        }

        let path = self.dir.join(format!("{PREFIX}{:03}{SUFFIX}", self.count + 1));
        fs::write(&path, frame.to_le_bytes())
            .with_context(|| format!("writing screenshot {}", path.display()))?;
        self.count += 1;
        log::info!(
            "screenshot saved: {} ({}/{})",
            path.display(),
            self.count,
            self.limit
        );
        Ok(Some(path))
    }
}

fn count_existing(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(PREFIX) && name.ends_with(SUFFIX)
        })
        .count()
}
