use std::time::{Duration, Instant};

use super::FrameTime;

/// Frames-per-second counter over fixed reporting windows.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    last_fps: Option<f32>,
}

impl FrameStats {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
            last_fps: None,
        }
    }

    /// Counts a frame; returns the rate when a reporting window closes.
    pub fn record(&mut self, ft: &FrameTime) -> Option<f32> {
        let start = *self.window_start.get_or_insert(ft.now);
        self.frames += 1;

        let elapsed = ft.now.saturating_duration_since(start);
        if elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.window_start = Some(ft.now);
        self.frames = 0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Rate of the last closed window.
    #[inline]
    pub fn fps(&self) -> Option<f32> {
        self.last_fps
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(now: Instant, frame_index: u64) -> FrameTime {
        FrameTime {
            dt: 0.0,
            now,
            frame_index,
        }
    }

    #[test]
    fn reports_once_per_window() {
        let mut stats = FrameStats::default();
        let start = Instant::now();

        // 60 frames spread over one second, plus the one closing the window.
        for i in 0..60u32 {
            let now = start + Duration::from_millis(u64::from(i) * 16);
            assert_eq!(stats.record(&frame(now, u64::from(i))), None);
        }

        let fps = stats.record(&frame(start + Duration::from_secs(1), 60)).unwrap();
        assert!((fps - 61.0).abs() < 1e-3, "{fps}");
        assert_eq!(stats.fps(), Some(fps));
    }

    #[test]
    fn no_rate_before_first_window() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.record(&frame(Instant::now(), 0)), None);
        assert_eq!(stats.fps(), None);
    }
}
