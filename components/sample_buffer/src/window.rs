// components/sample_buffer/src/window.rs
use std::ops::Range;

pub const DEFAULT_CHUNK_SECS: f64 = 20.0;
pub const DEFAULT_OVERLAP_SECS: f64 = 5.0;

/// A contiguous run of frames inside a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowDescriptor {
    start: usize,
    length: usize,
}

impl WindowDescriptor {
    pub fn new(start: usize, length: usize) -> Self {
        debug_assert!(length > 0, "windows are never empty");
        Self { start, length }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn start_secs(&self, sample_rate: u32) -> f64 {
        self.start as f64 / sample_rate as f64
    }

    pub fn length_secs(&self, sample_rate: u32) -> f64 {
        self.length as f64 / sample_rate as f64
    }
}

/// Window and step sizes resolved against a concrete signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    window_frames: usize,
    step_frames: usize,
    total_frames: usize,
}

impl WindowPlan {
    pub fn new(chunk_secs: f64, overlap_secs: f64, sample_rate: u32, total_frames: usize) -> Self {
        let rate = sample_rate as f64;
        // f64::max discards NaN, so non-finite input still lands on the clamp
        let window_frames = (chunk_secs * rate).round().max(1.0) as usize;
        let overlap_frames = (overlap_secs * rate).round().max(0.0) as usize;

        // Overlap at or beyond the window would stall the sweep; fall back to back-to-back windows
        let step_frames = match window_frames.checked_sub(overlap_frames) {
            Some(step) if step > 0 => step,
            _ => window_frames,
        };

        tracing::debug!(
            "Planned windows: window={} frames, step={} frames, total={} frames",
            window_frames,
            step_frames,
            total_frames
        );

        Self {
            window_frames,
            step_frames,
            total_frames,
        }
    }

    pub fn window_frames(&self) -> usize {
        self.window_frames
    }

    pub fn step_frames(&self) -> usize {
        self.step_frames
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn window_count(&self) -> usize {
        if self.total_frames == 0 {
            return 0;
        }
        (self.total_frames - 1) / self.step_frames + 1
    }

    pub fn windows(&self) -> Windows {
        Windows {
            plan: *self,
            offset: 0,
        }
    }
}

impl IntoIterator for WindowPlan {
    type Item = WindowDescriptor;
    type IntoIter = Windows;

    fn into_iter(self) -> Windows {
        self.windows()
    }
}

/// Lazy walk over a [`WindowPlan`], last window clipped to the remaining frames
#[derive(Debug, Clone)]
pub struct Windows {
    plan: WindowPlan,
    offset: usize,
}

impl Iterator for Windows {
    type Item = WindowDescriptor;

    fn next(&mut self) -> Option<WindowDescriptor> {
        if self.offset >= self.plan.total_frames {
            return None;
        }

        let remaining = self.plan.total_frames - self.offset;
        let window = WindowDescriptor::new(self.offset, self.plan.window_frames.min(remaining));
        self.offset = self.offset.saturating_add(self.plan.step_frames);
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.offset >= self.plan.total_frames {
            0
        } else {
            (self.plan.total_frames - self.offset - 1) / self.plan.step_frames + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RATE: u32 = 44100;

    fn secs(s: usize) -> usize {
        s * RATE as usize
    }

    #[test]
    fn forty_five_seconds_yields_three_windows() {
        let plan = WindowPlan::new(20.0, 5.0, RATE, secs(45));
        let windows: Vec<_> = plan.windows().collect();

        assert_eq!(plan.step_frames(), secs(15));
        assert_eq!(
            windows,
            vec![
                WindowDescriptor::new(0, secs(20)),
                WindowDescriptor::new(secs(15), secs(20)),
                WindowDescriptor::new(secs(30), secs(15)),
            ]
        );
    }

    #[test]
    fn short_file_yields_single_clipped_window() {
        let plan = WindowPlan::new(DEFAULT_CHUNK_SECS, DEFAULT_OVERLAP_SECS, RATE, secs(3));
        let windows: Vec<_> = plan.windows().collect();

        assert_eq!(windows, vec![WindowDescriptor::new(0, secs(3))]);
    }

    #[test]
    fn empty_signal_yields_no_windows() {
        let plan = WindowPlan::new(20.0, 5.0, RATE, 0);
        assert_eq!(plan.windows().count(), 0);
        assert_eq!(plan.window_count(), 0);
    }

    #[rstest]
    #[case(20.0, 20.0)]
    #[case(20.0, 25.0)]
    #[case(1.0, 100.0)]
    fn overlap_not_smaller_than_chunk_places_windows_back_to_back(
        #[case] chunk: f64,
        #[case] overlap: f64,
    ) {
        let plan = WindowPlan::new(chunk, overlap, RATE, secs(61));
        assert_eq!(plan.step_frames(), plan.window_frames());

        let windows: Vec<_> = plan.windows().collect();
        let bound = secs(61).div_ceil(plan.window_frames()) + 1;
        assert!(windows.len() <= bound);
        windows.windows(2).for_each(|pair| {
            assert_eq!(pair[0].end(), pair[1].start());
        });
    }

    #[rstest]
    #[case(-3.0, 0.0)]
    #[case(0.0, -1.0)]
    #[case(f64::NAN, f64::NAN)]
    fn degenerate_durations_are_clamped(#[case] chunk: f64, #[case] overlap: f64) {
        let plan = WindowPlan::new(chunk, overlap, 10, 7);
        assert!(plan.window_frames() >= 1);
        assert!(plan.step_frames() >= 1);
        assert_eq!(plan.windows().count(), plan.window_count());
    }

    #[test]
    fn windows_cover_signal_without_gaps() {
        let rate = 100;
        for total in [1usize, 2, 99, 100, 101, 1999, 2000, 2001, 4567] {
            for (chunk, overlap) in [
                (0.01, 0.0),
                (1.0, 0.0),
                (1.0, 0.5),
                (2.0, 1.99),
                (20.0, 5.0),
                (3.0, 3.0),
                (0.5, 7.0),
            ] {
                let plan = WindowPlan::new(chunk, overlap, rate, total);
                let windows: Vec<_> = plan.windows().collect();

                assert_eq!(windows.len(), plan.window_count());
                assert_eq!(windows.first().map(|w| w.start()), Some(0));
                assert_eq!(windows.last().map(|w| w.end()), Some(total));

                let mut covered_to = 0;
                for window in &windows {
                    assert!(window.length() > 0);
                    assert!(window.end() <= total);
                    assert!(
                        window.start() <= covered_to,
                        "gap before frame {} (total={}, chunk={}, overlap={})",
                        window.start(),
                        total,
                        chunk,
                        overlap
                    );
                    covered_to = covered_to.max(window.end());
                }
                windows.windows(2).for_each(|pair| {
                    assert!(pair[0].start() <= pair[1].start());
                });
            }
        }
    }

    #[test]
    fn descriptor_reports_seconds() {
        let window = WindowDescriptor::new(secs(15), secs(20));
        assert_eq!(window.start_secs(RATE), 15.0);
        assert_eq!(window.length_secs(RATE), 20.0);
        assert_eq!(window.range(), secs(15)..secs(35));
    }
}
