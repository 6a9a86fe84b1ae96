//! Frame timing for the frame-driven update loop

use std::time::{Duration, Instant};

/// Per-frame timing snapshot returned by [`FrameTimer::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Index of the frame that just finished (starting at 1)
    pub frame: u64,
    /// Seconds since the previous tick
    pub delta_time: f32,
    /// Seconds since the timer was created
    pub total_time: f32,
}

/// Frame timer tracking delta time and frame count
pub struct FrameTimer {
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Mark the end of a frame (call once per frame)
    pub fn tick(&mut self) -> FrameStats {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        FrameStats {
            frame: self.frame_count,
            delta_time: self.delta_time,
            total_time: self.elapsed().as_secs_f32(),
        }
    }

    /// Time since the timer was created
    pub fn elapsed(&self) -> Duration {
        self.last_frame.duration_since(self.started)
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        let total = self.elapsed().as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}
