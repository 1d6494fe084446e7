use std::time::{Duration, Instant};

/// Caps the redraw rate when the presentation layer does not pace frames.
///
/// Uncapped pacers are always due; vsync does the pacing.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_due: Instant,
}

impl FramePacer {
    pub fn uncapped() -> Self {
        Self {
            interval: None,
            next_due: Instant::now(),
        }
    }

    /// Pace to `fps` frames per second. Zero or non-finite rates are uncapped.
    pub fn with_fps(fps: f64) -> Self {
        let interval = (fps.is_finite() && fps > 0.0).then(|| Duration::from_secs_f64(1.0 / fps));
        Self {
            interval,
            next_due: Instant::now(),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// When the next frame is due, or `None` when uncapped.
    pub fn next_due(&self) -> Option<Instant> {
        self.interval.map(|_| self.next_due)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.interval.is_none() || now >= self.next_due
    }

    /// Record a frame drawn at `now` and return when the next one is due.
    ///
    /// Deadlines advance on a fixed grid; after a stall longer than one
    /// interval the grid restarts from `now` instead of bursting to catch up.
    pub fn frame_drawn(&mut self, now: Instant) -> Option<Instant> {
        let interval = self.interval?;
        self.next_due += interval;
        if self.next_due <= now {
            self.next_due = now + interval;
        }
        Some(self.next_due)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::uncapped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_is_always_due() {
        let mut pacer = FramePacer::uncapped();
        let now = Instant::now();
        assert!(pacer.is_due(now));
        assert_eq!(pacer.frame_drawn(now), None);
        assert_eq!(pacer.next_due(), None);
        assert!(pacer.is_due(now));
    }

    #[test]
    fn zero_fps_is_uncapped() {
        assert_eq!(FramePacer::with_fps(0.0).interval(), None);
        assert_eq!(FramePacer::with_fps(f64::INFINITY).interval(), None);
    }

    #[test]
    fn capped_spaces_deadlines() {
        let mut pacer = FramePacer::with_fps(50.0);
        let start = pacer.next_due;
        assert!(pacer.is_due(start));

        let next = pacer.frame_drawn(start).unwrap();
        assert_eq!(next - start, Duration::from_millis(20));
        assert_eq!(pacer.next_due(), Some(next));
        assert!(!pacer.is_due(start + Duration::from_millis(10)));
        assert!(pacer.is_due(next));
    }

    #[test]
    fn stall_restarts_grid() {
        let mut pacer = FramePacer::with_fps(100.0);
        let late = pacer.next_due + Duration::from_secs(1);
        let next = pacer.frame_drawn(late).unwrap();
        assert_eq!(next, late + Duration::from_millis(10));
    }
}
