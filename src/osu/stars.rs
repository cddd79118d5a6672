use super::{Skill, SkillKind};

use crate::{parse::Pos2, Beatmap, BeatmapAttributes, GameMode, Mods, PpError, PpResult};

use std::fmt;

const PLAYFIELD_WIDTH: f64 = 512.0;
const PLAYFIELD_CENTER: Pos2 = Pos2::new(PLAYFIELD_WIDTH / 2.0, 384.0 / 2.0);
const NORMALIZED_RADIUS: f64 = 52.0;
const CIRCLE_SIZE_BUFF_THRESHOLD: f64 = 30.0;
const DIFFICULTY_MULTIPLIER: f64 = 0.0675;
const EXTREME_SCALING_FACTOR: f64 = 0.5;

/// Default minimum milliseconds between two objects to count them as singletap.
pub const DEFAULT_SINGLETAP_THRESHOLD: f64 = 125.0;

/// Star calculation for osu!standard maps.
///
/// The calculation writes the normalized positions, strains, and singletap
/// flags of every [`HitObject`](crate::HitObject) of the given map.
///
/// # Example
///
/// ```
/// use oppai_pp::{Beatmap, Mods, OsuStars};
///
/// let (mut map, _) = Beatmap::parse_str("[HitObjects]\n0,0,0,1,0\n200,0,300,1,0\n");
///
/// let attrs = OsuStars::new(&mut map)
///     .mods(Mods::HIDDEN | Mods::DOUBLE_TIME)
///     .calculate()
///     .unwrap();
///
/// println!("{attrs}");
/// ```
#[derive(Debug)]
pub struct OsuStars<'m> {
    map: &'m mut Beatmap,
    mods: Mods,
    singletap_threshold: f64,
}

impl<'m> OsuStars<'m> {
    #[inline]
    pub fn new(map: &'m mut Beatmap) -> Self {
        Self {
            map,
            mods: Mods::NONE,
            singletap_threshold: DEFAULT_SINGLETAP_THRESHOLD,
        }
    }

    #[inline]
    pub fn mods(mut self, mods: impl Into<Mods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Minimum clock rate adjusted milliseconds between two objects
    /// for them to count towards [`DifficultyAttributes::singletap_threshold_count`].
    #[inline]
    pub fn singletap_threshold(mut self, ms: f64) -> Self {
        self.singletap_threshold = ms;

        self
    }

    pub fn calculate(self) -> PpResult<DifficultyAttributes> {
        let Self {
            map,
            mods,
            singletap_threshold,
        } = self;

        if map.mode != GameMode::Standard {
            return Err(PpError::UnsupportedMode(map.mode));
        }

        let map_attributes = BeatmapAttributes::new(None, None, Some(map.cs), None).mods(mods);
        let clock_rate = map_attributes.clock_rate;
        let cs = map_attributes.cs.unwrap_or(map.cs);

        let radius = PLAYFIELD_WIDTH / 16.0 * (1.0 - 0.7 * (cs - 5.0) / 5.0);
        let mut scaling_factor = NORMALIZED_RADIUS / radius;

        if radius < CIRCLE_SIZE_BUFF_THRESHOLD {
            let small_circle_bonus = (CIRCLE_SIZE_BUFF_THRESHOLD - radius).min(5.0) / 50.0;
            scaling_factor *= 1.0 + small_circle_bonus;
        }

        let center = PLAYFIELD_CENTER * scaling_factor;

        for h in map.hit_objects.iter_mut() {
            h.normalized_pos = if h.is_spinner() {
                center
            } else {
                h.pos * scaling_factor
            };

            h.strains = [0.0; 2];
            h.is_single = false;
        }

        let mut aim = Skill::new(SkillKind::Aim);
        let mut speed = Skill::new(SkillKind::Speed);

        aim.process(&mut map.hit_objects, clock_rate);
        speed.process(&mut map.hit_objects, clock_rate);

        aim.collect_peaks(&map.hit_objects, clock_rate);
        speed.collect_peaks(&map.hit_objects, clock_rate);

        let mut aim_strain = aim.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        let speed_strain = speed.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;

        if mods.td() {
            aim_strain = aim_strain.powf(0.8);
        }

        let stars =
            aim_strain + speed_strain + (aim_strain - speed_strain).abs() * EXTREME_SCALING_FACTOR;

        let singletap_count = map.hit_objects.iter().filter(|h| h.is_single).count() as u32;

        let singletap_threshold_count = map
            .hit_objects
            .windows(2)
            .filter(|pair| {
                !pair[1].is_spinner()
                    && (pair[1].start_time - pair[0].start_time) / clock_rate >= singletap_threshold
            })
            .count() as u32;

        let attributes = DifficultyAttributes {
            total: stars,
            aim: aim_strain,
            speed: speed_strain,
            singletap_count,
            singletap_threshold_count,
        };

        tracing::debug!(%mods, %attributes, "calculated difficulty");

        Ok(attributes)
    }
}

/// Star calculation with default settings, see [`OsuStars`].
#[inline]
pub fn stars(map: &mut Beatmap, mods: impl Into<Mods>) -> PpResult<DifficultyAttributes> {
    OsuStars::new(map).mods(mods).calculate()
}

/// The result of a star calculation on an osu!standard map.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyAttributes {
    /// The final star rating.
    pub total: f64,
    /// The aim portion of the star rating.
    pub aim: f64,
    /// The speed portion of the star rating.
    pub speed: f64,
    /// Amount of objects spaced far enough from their successor to require singletapping.
    pub singletap_count: u32,
    /// Amount of circles and sliders at least the singletap threshold apart from their predecessor.
    pub singletap_threshold_count: u32,
}

impl fmt::Display for DifficultyAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} stars ({:.2} aim, {:.2} speed)",
            self.total, self.aim, self.speed
        )
    }
}
