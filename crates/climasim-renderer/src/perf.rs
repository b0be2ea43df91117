//! Frame pacing: the simulation time step and a rolling frame rate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: usize = 120;

/// Measures the gap between frames.
pub struct FrameTimer {
    last_frame: Instant,
    last_delta: Duration,
    recent: VecDeque<Duration>,
    recent_total: Duration,
    frames: u64,
}

impl FrameTimer {
    /// Longest step handed to the simulation, so a stall doesn't jump the
    /// animation forward.
    pub const MAX_DELTA: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            last_delta: Duration::ZERO,
            recent: VecDeque::with_capacity(WINDOW),
            recent_total: Duration::ZERO,
            frames: 0,
        }
    }

    /// Mark the start of a frame. Call once per frame.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.last_delta = now - self.last_frame;
        self.last_frame = now;
        self.frames += 1;

        self.recent.push_back(self.last_delta);
        self.recent_total += self.last_delta;
        if self.recent.len() > WINDOW {
            if let Some(old) = self.recent.pop_front() {
                self.recent_total -= old;
            }
        }
    }

    /// Seconds since the previous frame, capped at [`Self::MAX_DELTA`].
    pub fn delta_seconds(&self) -> f32 {
        self.last_delta.min(Self::MAX_DELTA).as_secs_f32()
    }

    /// Frames per second over the last 120 frames.
    pub fn fps(&self) -> f64 {
        let total = self.recent_total.as_secs_f64();
        if total <= 0.0 {
            return 0.0;
        }
        self.recent.len() as f64 / total
    }

    /// Frames begun since construction.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_timer_has_no_step() {
        let timer = FrameTimer::new();
        assert_eq!(timer.delta_seconds(), 0.0);
        assert_eq!(timer.fps(), 0.0);
        assert_eq!(timer.frame_count(), 0);
    }

    #[test]
    fn frames_produce_steps_and_rate() {
        let mut timer = FrameTimer::new();
        for _ in 0..5 {
            std::thread::sleep(Duration::from_millis(2));
            timer.begin_frame();
        }
        assert!(timer.delta_seconds() > 0.0);
        assert!(timer.fps() > 0.0);
        assert_eq!(timer.frame_count(), 5);
    }

    #[test]
    fn delta_is_capped() {
        let mut timer = FrameTimer::new();
        std::thread::sleep(Duration::from_millis(300));
        timer.begin_frame();
        assert_eq!(timer.delta_seconds(), FrameTimer::MAX_DELTA.as_secs_f32());
    }

    #[test]
    fn rate_window_is_bounded() {
        let mut timer = FrameTimer::new();
        for _ in 0..(WINDOW + 30) {
            timer.begin_frame();
        }
        assert_eq!(timer.recent.len(), WINDOW);
        assert_eq!(timer.frame_count(), (WINDOW + 30) as u64);
    }
}
