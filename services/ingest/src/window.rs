/// Relative time range for one audit request.
///
/// The API only accepts an integral number of relative minutes, so the
/// span is always rounded up; under-requesting a partial minute could
/// silently miss records at the edge of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollWindow {
    /// Unix seconds; the prior watermark, or the history fallback.
    pub start: i64,
    /// Whole minutes between `start` and now, rounded up (min 1).
    pub minutes: u32,
}

impl PollWindow {
    pub fn compute(watermark: Option<i64>, now: i64, history_days: u32) -> Self {
        match watermark {
            Some(start) => {
                let elapsed = (now - start).max(0);
                let minutes = ((elapsed + 59) / 60).clamp(1, i64::from(u32::MAX)) as u32;
                Self { start, minutes }
            }
            None => Self {
                start: now - i64::from(history_days) * 86_400,
                minutes: history_days.saturating_mul(1_440),
            },
        }
    }
}
