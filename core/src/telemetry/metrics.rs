use std::sync::Mutex;

/// Counters reported by the host loop.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub frames: usize,
    pub fetch_ok: usize,
    pub fetch_failures: usize,
    pub screenshots: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_frame(&self) {
        self.update(|m| m.frames += 1);
    }

    pub fn record_fetch(&self, ok: bool) {
        self.update(|m| {
            if ok {
                m.fetch_ok += 1;
            } else {
                m.fetch_failures += 1;
            }
        });
    }

    pub fn record_screenshot(&self) {
        self.update(|m| m.screenshots += 1);
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner.lock().map(|m| *m).unwrap_or_default()
    }

    fn update(&self, apply: impl FnOnce(&mut Metrics)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
