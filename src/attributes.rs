use crate::{Beatmap, Mods};

/// Summary struct for a [`Beatmap`]'s base difficulty values.
///
/// Every value is optional so that only the requested ones are adjusted.
///
/// # Example
///
/// ```
/// use oppai_pp::{BeatmapAttributes, Mods};
///
/// let attrs = BeatmapAttributes::new(Some(9.0), Some(8.0), None, None)
///     .mods(Mods::DOUBLE_TIME);
///
/// assert!((attrs.clock_rate - 1.5).abs() < f64::EPSILON);
/// assert!(attrs.ar.unwrap() > 9.0);
/// assert!(attrs.cs.is_none());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    pub ar: Option<f64>,
    pub od: Option<f64>,
    pub cs: Option<f64>,
    pub hp: Option<f64>,
    pub clock_rate: f64,
}

impl BeatmapAttributes {
    const AR0_MS: f64 = 1800.0;
    const AR5_MS: f64 = 1200.0;
    const AR10_MS: f64 = 450.0;
    const AR_MS_STEP_1: f64 = (Self::AR0_MS - Self::AR5_MS) / 5.0;
    const AR_MS_STEP_2: f64 = (Self::AR5_MS - Self::AR10_MS) / 5.0;

    const OD0_MS: f64 = 80.0;
    const OD10_MS: f64 = 20.0;
    const OD_MS_STEP: f64 = (Self::OD0_MS - Self::OD10_MS) / 10.0;

    #[inline]
    pub const fn new(ar: Option<f64>, od: Option<f64>, cs: Option<f64>, hp: Option<f64>) -> Self {
        Self {
            ar,
            od,
            cs,
            hp,
            clock_rate: 1.0,
        }
    }

    /// Adjusts attributes w.r.t. mods.
    ///
    /// AR and OD are converted into their hit windows, scaled by the clock
    /// rate, and converted back. CS and HP are capped at 10.
    pub fn mods(self, mods: Mods) -> Self {
        if !mods.change_map() {
            return self;
        }

        let clock_rate = mods.speed();
        let multiplier = mods.od_ar_hp_multiplier();

        let ar = self.ar.map(|ar| {
            let ar = ar * multiplier;

            let ar_ms = if ar < 5.0 {
                Self::AR0_MS - Self::AR_MS_STEP_1 * ar
            } else {
                Self::AR5_MS - Self::AR_MS_STEP_2 * (ar - 5.0)
            };

            // clamp to the 0-10 range before the clock rate lets it exceed it
            let ar_ms = ar_ms.clamp(Self::AR10_MS, Self::AR0_MS) / clock_rate;

            if ar_ms > Self::AR5_MS {
                (Self::AR0_MS - ar_ms) / Self::AR_MS_STEP_1
            } else {
                5.0 + (Self::AR5_MS - ar_ms) / Self::AR_MS_STEP_2
            }
        });

        let od = self.od.map(|od| {
            let od = od * multiplier;
            let od_ms = Self::OD0_MS - (Self::OD_MS_STEP * od).ceil();
            let od_ms = od_ms.clamp(Self::OD10_MS, Self::OD0_MS) / clock_rate;

            (Self::OD0_MS - od_ms) / Self::OD_MS_STEP
        });

        let cs = self.cs.map(|mut cs| {
            if mods.hr() {
                cs *= 1.3;
            }

            if mods.ez() {
                cs *= 0.5;
            }

            cs.min(10.0)
        });

        let hp = self.hp.map(|hp| (hp * multiplier).min(10.0));

        Self {
            ar,
            od,
            cs,
            hp,
            clock_rate,
        }
    }
}

impl Beatmap {
    /// The map's AR, OD, CS, and HP without any mods applied.
    #[inline]
    pub const fn attributes(&self) -> BeatmapAttributes {
        BeatmapAttributes::new(Some(self.ar), Some(self.od), Some(self.cs), Some(self.hp))
    }
}
