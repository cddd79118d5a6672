use super::{Beatmap, TimingPoint};

/// Tracks the active timing point while walking through a map's sliders
/// in chronological order.
pub(crate) struct SliderState<'p> {
    points: &'p [TimingPoint],
    next_idx: usize,
    next_time: f64,
    px_per_beat: f64,

    slider_velocity: f64,
    tick_rate: f64,
    format_version: u32,
}

impl<'p> SliderState<'p> {
    #[inline]
    pub(crate) fn new(map: &'p Beatmap) -> Self {
        Self {
            points: &map.timing_points,
            next_idx: 0,
            next_time: f64::NEG_INFINITY,
            px_per_beat: map.slider_velocity * 100.0,

            slider_velocity: map.slider_velocity,
            tick_rate: map.tick_rate,
            format_version: map.format_version,
        }
    }

    /// Combo given by a slider, i.e. its head, ticks, repeats, and tail.
    pub(crate) fn count_ticks(&mut self, time: f64, pixel_len: f64, repeats: u32) -> u32 {
        while time >= self.next_time {
            let Some(point) = self.points.get(self.next_idx) else {
                self.next_time = f64::INFINITY;

                break;
            };

            self.next_idx += 1;
            self.next_time = self
                .points
                .get(self.next_idx)
                .map_or(f64::INFINITY, |next| next.time);

            let sv_multiplier = point.sv_multiplier();
            self.px_per_beat = self.slider_velocity * 100.0 * sv_multiplier;

            // maps older than v8 don't apply the velocity multiplier to ticks
            if self.format_version < 8 {
                self.px_per_beat /= sv_multiplier;
            }
        }

        let spans = f64::from(repeats);

        let ticks = if self.px_per_beat > 0.0 && self.px_per_beat.is_finite() {
            let beats = pixel_len * spans / self.px_per_beat;

            ((beats - 0.1) / spans * self.tick_rate).ceil() - 1.0
        } else {
            0.0
        };

        // NaN ends up as 0
        (ticks * spans + spans + 1.0).max(0.0).min(f64::from(u32::MAX)) as u32
    }
}
