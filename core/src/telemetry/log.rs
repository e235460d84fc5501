use log::{debug, info, warn};

/// Component-tagged wrapper over the `log` facade.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }

    pub fn degraded(&self, message: &str) {
        warn!("[{}] {}", self.component, message);
    }

    pub fn trace_frame(&self, message: &str) {
        debug!("[{}] {}", self.component, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("radar")
    }
}
