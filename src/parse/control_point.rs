/// Entry of the `[TimingPoints]` section.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingPoint {
    pub time: f64,
    /// Beat length for tempo changes, negative inverse slider velocity
    /// percentage otherwise.
    pub beat_len: f64,
    /// `true` if this point is an uninherited tempo change.
    pub change: bool,
}

impl TimingPoint {
    /// Slider velocity multiplier this point applies.
    ///
    /// Only inherited points with a negative beat length modify the
    /// velocity; everything else yields `1.0`.
    #[inline]
    pub fn sv_multiplier(&self) -> f64 {
        if !self.change && self.beat_len < 0.0 {
            -100.0 / self.beat_len
        } else {
            1.0
        }
    }
}
