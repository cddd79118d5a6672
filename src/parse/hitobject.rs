use super::Pos2;

/// A hitobject as read from the `[HitObjects]` section.
///
/// `pos`, `start_time`, and `kind` are set while parsing. The remaining fields
/// are filled in by [`OsuStars`](crate::osu::OsuStars) and are only
/// meaningful after a difficulty calculation on the owning map.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos2,
    /// Start time in milliseconds.
    pub start_time: f64,
    pub kind: HitObjectKind,

    /// Position scaled w.r.t. the circle size; spinners sit in the center.
    pub normalized_pos: Pos2,
    /// Strain values indexed by [`SkillKind`](crate::osu::SkillKind).
    pub strains: [f64; 2],
    /// Whether the spacing to the next object requires singletapping.
    pub is_single: bool,
}

impl HitObject {
    #[inline]
    pub(crate) fn new(pos: Pos2, start_time: f64, kind: HitObjectKind) -> Self {
        Self {
            pos,
            start_time,
            kind,
            normalized_pos: Pos2::zero(),
            strains: [0.0; 2],
            is_single: false,
        }
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    #[inline]
    pub fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider { .. })
    }

    #[inline]
    pub fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner)
    }
}

/// Further data related to specific object types.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider {
        /// Pixel length of the first span.
        pixel_len: f64,
        /// Amount of spans, i.e. `1` for a slider without repeats.
        repeats: u32,
    },
    Spinner,
}
