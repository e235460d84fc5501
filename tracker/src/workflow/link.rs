use std::path::PathBuf;

/// Uplink liveness probe, polled between frames.
pub trait LinkMonitor {
    fn is_connected(&mut self) -> bool;
}

/// Link that never drops.
pub struct AlwaysUp;

impl LinkMonitor for AlwaysUp {
    fn is_connected(&mut self) -> bool {
        true
    }
}

/// Link that reports down while a flag file exists.
pub struct FlagFileLink {
    flag: PathBuf,
}

impl FlagFileLink {
    pub fn new(flag: PathBuf) -> Self {
        Self { flag }
    }
}

impl LinkMonitor for FlagFileLink {
    fn is_connected(&mut self) -> bool {
        !self.flag.exists()
    }
}

pub fn build_link(flag: Option<PathBuf>) -> Box<dyn LinkMonitor> {
    match flag {
        Some(path) => Box::new(FlagFileLink::new(path)),
        None => Box::new(AlwaysUp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn flag_file_toggles_link() {
        let dir = tempdir().unwrap();
        let flag = dir.path().join("link-down");
        let mut link = FlagFileLink::new(flag.clone());
        assert!(link.is_connected());
        std::fs::write(&flag, b"").unwrap();
        assert!(!link.is_connected());
    }
}
