use crate::parse::HitObject;

const SINGLE_SPACING: f64 = 125.0;
const STREAM_SPACING: f64 = 110.0;
const ALMOST_DIAMETER: f64 = 56.25;

const SPEED_SKILL_MULTIPLIER: f64 = 1400.0;
const SPEED_STRAIN_DECAY_BASE: f64 = 0.15;

const AIM_SKILL_MULTIPLIER: f64 = 26.25;
const AIM_STRAIN_DECAY_BASE: f64 = 0.3;

const MIN_STRAIN_TIME: f64 = 50.0;

/// The two skills whose strains make up the star rating.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkillKind {
    Aim = 0,
    Speed = 1,
}

impl SkillKind {
    /// Index into [`HitObject::strains`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub(crate) const fn strain_decay_base(self) -> f64 {
        match self {
            Self::Aim => AIM_STRAIN_DECAY_BASE,
            Self::Speed => SPEED_STRAIN_DECAY_BASE,
        }
    }

    #[inline]
    const fn skill_multiplier(self) -> f64 {
        match self {
            Self::Aim => AIM_SKILL_MULTIPLIER,
            Self::Speed => SPEED_SKILL_MULTIPLIER,
        }
    }

    /// Weight of the jump distance between two objects and whether
    /// the distance is large enough to require singletapping.
    pub(crate) fn spacing_weight(self, dist: f64) -> (f64, bool) {
        match self {
            Self::Aim => (dist.powf(0.99), false),
            Self::Speed => {
                if dist > SINGLE_SPACING {
                    (2.5, true)
                } else if dist > STREAM_SPACING {
                    let weight = 1.6
                        + 0.9 * (dist - STREAM_SPACING) / (SINGLE_SPACING - STREAM_SPACING);

                    (weight, true)
                } else if dist > ALMOST_DIAMETER {
                    let weight = 1.2
                        + 0.4 * (dist - ALMOST_DIAMETER) / (STREAM_SPACING - ALMOST_DIAMETER);

                    (weight, false)
                } else if dist > ALMOST_DIAMETER / 2.0 {
                    let weight = 0.95
                        + 0.25 * (dist - ALMOST_DIAMETER / 2.0) / (ALMOST_DIAMETER / 2.0);

                    (weight, false)
                } else {
                    (0.95, false)
                }
            }
        }
    }

    /// Strain of `curr` given its predecessor whose strain is already known.
    ///
    /// The second value is `true` if `prev` should be flagged as singletap.
    pub(crate) fn strain_of(self, curr: &HitObject, prev: &HitObject, clock_rate: f64) -> (f64, bool) {
        let delta = (curr.start_time - prev.start_time) / clock_rate;
        let decay = self.strain_decay_base().powf(delta / 1000.0);

        let (value, is_single) = if curr.is_spinner() {
            (0.0, false)
        } else {
            let dist = (curr.normalized_pos - prev.normalized_pos).length();
            let (weight, is_single) = self.spacing_weight(dist);

            (weight * self.skill_multiplier(), is_single)
        };

        let strain = prev.strains[self.index()] * decay + value / delta.max(MIN_STRAIN_TIME);

        (strain, is_single)
    }
}
