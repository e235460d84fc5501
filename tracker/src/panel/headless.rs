use radarcore::interface::framebuffer::{pulse_overlay, FrameBuffer};
use radarcore::prelude::{Display, PixelSink};

pub const PANEL_WIDTH: usize = 240;
pub const PANEL_HEIGHT: usize = 240;
const PULSE_CYCLES: usize = 4;
const PULSE_GRID: usize = 4;

/// In-memory stand-in for the LCD: draws into a back buffer and copies it
/// to the visible front buffer on commit.
pub struct HeadlessPanel {
    back: FrameBuffer,
    front: FrameBuffer,
    commits: u64,
    pulse_step: usize,
}

impl HeadlessPanel {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            back: FrameBuffer::new(width, height),
            front: FrameBuffer::new(width, height),
            commits: 0,
            pulse_step: 0,
        }
    }

    /// What the panel currently shows.
    pub fn visible(&self) -> &FrameBuffer {
        &self.front
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Inverts the visible frame to flag a lost uplink.
    pub fn show_link_lost(&mut self) {
        self.back.clone_from(&self.front);
        self.back.invert();
        self.commit_frame();
    }

    /// One step of the pulse shown while waiting for the uplink.
    pub fn pulse(&mut self) {
        let overlay = pulse_overlay(self.pulse_step, PULSE_CYCLES);
        self.pulse_step = (self.pulse_step + 1) % PULSE_CYCLES;
        self.back.blend_grid(overlay, PULSE_GRID);
        self.commit_frame();
    }
}

impl Default for HeadlessPanel {
    fn default() -> Self {
        Self::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}

impl PixelSink for HeadlessPanel {
    fn width(&self) -> i32 {
        self.back.width()
    }

    fn height(&self) -> i32 {
        self.back.height()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        self.back.set_pixel(x, y, color);
    }

    fn get_pixel(&self, x: i32, y: i32) -> Option<u16> {
        self.back.get_pixel(x, y)
    }

    fn fill(&mut self, color: u16) {
        self.back.fill(color);
    }
}

impl Display for HeadlessPanel {
    fn commit_frame(&mut self) {
        self.front.clone_from(&self.back);
        self.commits += 1;
    }
}
