use super::DifficultyAttributes;

use crate::{
    accuracy::{accuracy, accuracy_signed, round_to_hit_counts},
    Beatmap, BeatmapAttributes, GameMode, Mods, PpError, PpResult,
};

use std::fmt;

/// Scoring system the accuracy value is based on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScoreVersion {
    /// Sliders and spinners don't count towards accuracy.
    #[default]
    V1,
    /// Every object counts like a circle.
    V2,
}

impl TryFrom<u8> for ScoreVersion {
    type Error = PpError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            _ => Err(PpError::InvalidInput(format!(
                "unsupported score version {version}"
            ))),
        }
    }
}

/// Calculator for pp on osu!standard maps.
///
/// Map related values can either be taken from a [`Beatmap`] or be
/// specified one by one; values set explicitly take precedence over the map.
///
/// # Example
///
/// ```
/// use oppai_pp::{Beatmap, Mods, OsuPP, OsuStars};
///
/// let (mut map, _) = Beatmap::parse_str("[HitObjects]\n0,0,0,1,0\n200,0,300,1,0\n");
/// let attrs = OsuStars::new(&mut map).mods(Mods::HIDDEN).calculate().unwrap();
///
/// let result = OsuPP::from_map(&map)
///     .attributes(attrs)
///     .mods(Mods::HIDDEN)
///     .combo(2)
///     .misses(0)
///     .accuracy(100.0)
///     .calculate()
///     .unwrap();
///
/// println!("{result}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct OsuPP<'m> {
    map: Option<&'m Beatmap>,
    mods: Mods,

    aim_stars: Option<f64>,
    speed_stars: Option<f64>,
    max_combo: Option<u32>,
    n_sliders: Option<u32>,
    n_circles: Option<u32>,
    n_objects: Option<u32>,
    base_ar: Option<f64>,
    base_od: Option<f64>,

    combo: Option<u32>,
    acc: Option<f64>,
    n300: Option<u32>,
    n100: u32,
    n50: u32,
    n_misses: u32,
    score_version: Option<u8>,
}

impl<'m> OsuPP<'m> {
    /// Creates a calculator without a map. All map related values need
    /// to be set explicitly.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new calculator for the given map.
    #[inline]
    pub fn from_map(map: &'m Beatmap) -> Self {
        Self {
            map: Some(map),
            ..Self::default()
        }
    }

    /// Provide the star ratings of a previous [`OsuStars`](super::OsuStars)
    /// calculation with the same mods.
    #[inline]
    pub fn attributes(mut self, attributes: DifficultyAttributes) -> Self {
        self.aim_stars = Some(attributes.aim);
        self.speed_stars = Some(attributes.speed);

        self
    }

    #[inline]
    pub fn mods(mut self, mods: impl Into<Mods>) -> Self {
        self.mods = mods.into();

        self
    }

    #[inline]
    pub fn aim_stars(mut self, stars: f64) -> Self {
        self.aim_stars = Some(stars);

        self
    }

    #[inline]
    pub fn speed_stars(mut self, stars: f64) -> Self {
        self.speed_stars = Some(stars);

        self
    }

    #[inline]
    pub fn max_combo(mut self, max_combo: u32) -> Self {
        self.max_combo = Some(max_combo);

        self
    }

    #[inline]
    pub fn n_sliders(mut self, n_sliders: u32) -> Self {
        self.n_sliders = Some(n_sliders);

        self
    }

    #[inline]
    pub fn n_circles(mut self, n_circles: u32) -> Self {
        self.n_circles = Some(n_circles);

        self
    }

    /// Total amount of objects, including spinners.
    #[inline]
    pub fn n_objects(mut self, n_objects: u32) -> Self {
        self.n_objects = Some(n_objects);

        self
    }

    /// AR before applying mods.
    #[inline]
    pub fn ar(mut self, ar: f64) -> Self {
        self.base_ar = Some(ar);

        self
    }

    /// OD before applying mods.
    #[inline]
    pub fn od(mut self, od: f64) -> Self {
        self.base_od = Some(od);

        self
    }

    /// Specify the max combo of the play.
    #[inline]
    pub fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of 300s of a play.
    #[inline]
    pub fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    #[inline]
    pub fn n100(mut self, n100: u32) -> Self {
        self.n100 = n100;

        self
    }

    /// Specify the amount of 50s of a play.
    #[inline]
    pub fn n50(mut self, n50: u32) -> Self {
        self.n50 = n50;

        self
    }

    /// Specify the amount of misses of a play.
    ///
    /// Capped at the amount of objects.
    #[inline]
    pub fn misses(mut self, n_misses: u32) -> Self {
        self.n_misses = n_misses;

        self
    }

    /// Generate the hit results with respect to the given accuracy between `0` and `100`.
    ///
    /// Overrides any 300, 100, or 50 count.
    #[inline]
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc);

        self
    }

    /// `1` for score v1 (default), `2` for score v2.
    #[inline]
    pub fn score_version(mut self, version: u8) -> Self {
        self.score_version = Some(version);

        self
    }

    pub fn calculate(self) -> PpResult<PerformanceResult> {
        let map = self.map;

        if let Some(map) = map.filter(|map| map.mode != GameMode::Standard) {
            return Err(PpError::UnsupportedMode(map.mode));
        }

        let score_version = self
            .score_version
            .map_or(Ok(ScoreVersion::V1), ScoreVersion::try_from)?;

        let aim_stars = self
            .aim_stars
            .ok_or(PpError::MissingParameter("aim_stars"))?;

        let speed_stars = self
            .speed_stars
            .ok_or(PpError::MissingParameter("speed_stars"))?;

        let mut max_combo = self
            .max_combo
            .or_else(|| map.map(Beatmap::max_combo))
            .ok_or(PpError::MissingParameter("max_combo"))?;

        let n_sliders = self
            .n_sliders
            .or_else(|| map.map(|map| map.n_sliders))
            .ok_or(PpError::MissingParameter("n_sliders"))?;

        let mut n_circles = self
            .n_circles
            .or_else(|| map.map(|map| map.n_circles))
            .ok_or(PpError::MissingParameter("n_circles"))?;

        let n_objects = self
            .n_objects
            .or_else(|| map.map(|map| map.hit_objects.len() as u32))
            .ok_or(PpError::MissingParameter("n_objects"))?;

        let base_ar = self
            .base_ar
            .or_else(|| map.map(|map| map.ar))
            .ok_or(PpError::MissingParameter("ar"))?;

        let base_od = self
            .base_od
            .or_else(|| map.map(|map| map.od))
            .ok_or(PpError::MissingParameter("od"))?;

        if max_combo == 0 {
            tracing::warn!("max combo is 0, using 1 instead");
            max_combo = 1;
        }

        let n_misses = self.n_misses.min(n_objects);
        let combo = self.combo.unwrap_or(max_combo.saturating_sub(n_misses));

        let (n300, n100, n50) = match self.acc {
            Some(acc) => round_to_hit_counts(acc, n_objects, n_misses),
            None => {
                let n300 = self.n300.unwrap_or_else(|| {
                    n_objects
                        .saturating_sub(self.n100)
                        .saturating_sub(self.n50)
                        .saturating_sub(n_misses)
                });

                (n300, self.n100, self.n50)
            }
        };

        let acc = accuracy(n300, n100, n50, n_misses);

        let real_acc = match score_version {
            ScoreVersion::V1 => {
                // sliders are free 300s in score v1, same for spinners
                let n_spinners = n_objects.saturating_sub(n_sliders).saturating_sub(n_circles);
                let n300 = i64::from(n300) - i64::from(n_sliders) - i64::from(n_spinners);

                accuracy_signed(n300, i64::from(n100), i64::from(n50), i64::from(n_misses))
                    .max(0.0)
            }
            ScoreVersion::V2 => {
                n_circles = n_objects;

                acc
            }
        };

        let map_attributes = BeatmapAttributes::new(Some(base_ar), Some(base_od), None, None)
            .mods(self.mods);

        let state = ScoreState {
            mods: self.mods,
            acc,
            real_acc,
            ar: map_attributes.ar.unwrap_or(base_ar),
            od: map_attributes.od.unwrap_or(base_od),
            n_circles: f64::from(n_circles),
            len_bonus: length_bonus(f64::from(n_objects)),
            miss_penalty: 0.97_f64.powf(f64::from(n_misses)),
            combo_break: f64::from(combo).powf(0.8) / f64::from(max_combo).powf(0.8),
        };

        let aim_pp = state.compute_aim_value(aim_stars);
        let speed_pp = state.compute_speed_value(speed_stars);
        let acc_pp = state.compute_accuracy_value();

        let mut multiplier = 1.12;

        if self.mods.nf() {
            multiplier *= 0.9;
        }

        if self.mods.sd() {
            multiplier *= 0.95;
        }

        let pp = (aim_pp.powf(1.1) + speed_pp.powf(1.1) + acc_pp.powf(1.1)).powf(1.0 / 1.1)
            * multiplier;

        let result = PerformanceResult {
            total_pp: pp,
            aim_pp,
            speed_pp,
            accuracy_pp: acc_pp,
            accuracy_percent: acc * 100.0,
        };

        tracing::debug!(mods = %self.mods, %result, "calculated performance");

        Ok(result)
    }
}

/// Values shared between the aim, speed, and accuracy portions.
struct ScoreState {
    mods: Mods,
    acc: f64,
    real_acc: f64,
    ar: f64,
    od: f64,
    n_circles: f64,
    len_bonus: f64,
    miss_penalty: f64,
    combo_break: f64,
}

impl ScoreState {
    fn compute_aim_value(&self, aim_stars: f64) -> f64 {
        let mut aim_value = base_strain(aim_stars);
        aim_value *= self.len_bonus * self.miss_penalty * self.combo_break;

        // AR bonus
        let mut ar_bonus = 1.0;

        if self.ar > 10.33 {
            ar_bonus += 0.45 * (self.ar - 10.33);
        } else if self.ar < 8.0 {
            let mut low_ar_bonus = 0.01 * (8.0 - self.ar);

            if self.mods.hd() {
                low_ar_bonus *= 2.0;
            }

            ar_bonus += low_ar_bonus;
        }

        aim_value *= ar_bonus;

        if self.mods.hd() {
            aim_value *= 1.02 + (11.0 - self.ar) / 50.0;
        }

        if self.mods.fl() {
            aim_value *= 1.45 * self.len_bonus;
        }

        aim_value * self.acc_bonus() * self.od_bonus()
    }

    fn compute_speed_value(&self, speed_stars: f64) -> f64 {
        let mut speed_value = base_strain(speed_stars);
        speed_value *= self.len_bonus * self.miss_penalty * self.combo_break;
        speed_value *= self.acc_bonus() * self.od_bonus();

        if self.mods.hd() {
            speed_value *= 1.18;
        }

        speed_value
    }

    fn compute_accuracy_value(&self) -> f64 {
        let mut acc_value = 1.52163_f64.powf(self.od) * self.real_acc.powi(24) * 2.83;

        // Bonus for many hitcircles
        acc_value *= (self.n_circles / 1000.0).powf(0.3).min(1.15);

        if self.mods.hd() {
            acc_value *= 1.02;
        }

        if self.mods.fl() {
            acc_value *= 1.02;
        }

        acc_value
    }

    #[inline]
    fn acc_bonus(&self) -> f64 {
        0.5 + self.acc / 2.0
    }

    #[inline]
    fn od_bonus(&self) -> f64 {
        0.98 + self.od * self.od / 2500.0
    }
}

#[inline]
fn base_strain(stars: f64) -> f64 {
    (5.0 * (stars / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0
}

#[inline]
fn length_bonus(n_objects: f64) -> f64 {
    let over_2k = n_objects / 2000.0;
    let mut len_bonus = 0.95 + 0.4 * over_2k.min(1.0);

    if n_objects > 2000.0 {
        len_bonus += over_2k.log10() * 0.5;
    }

    len_bonus
}

/// The result of a performance calculation on an osu!standard map.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceResult {
    pub total_pp: f64,
    pub aim_pp: f64,
    pub speed_pp: f64,
    pub accuracy_pp: f64,
    /// Accuracy of the play between `0.0` and `100.0`.
    pub accuracy_percent: f64,
}

impl fmt::Display for PerformanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}pp ({:.2} aim, {:.2} speed, {:.2} acc), {:.2}%",
            self.total_pp, self.aim_pp, self.speed_pp, self.accuracy_pp, self.accuracy_percent
        )
    }
}
