use super::SkillKind;

use crate::parse::HitObject;

use std::cmp::Ordering;

const SECTION_LEN: f64 = 400.0;
const DECAY_WEIGHT: f64 = 0.9;

pub(crate) struct Skill {
    kind: SkillKind,
    current_section_peak: f64,
    pub(crate) strain_peaks: Vec<f64>,
}

impl Skill {
    #[inline]
    pub(crate) fn new(kind: SkillKind) -> Self {
        Self {
            kind,
            current_section_peak: 0.0,
            strain_peaks: Vec::with_capacity(128),
        }
    }

    /// Compute the strain of every object w.r.t. its predecessor.
    pub(crate) fn process(&self, hit_objects: &mut [HitObject], clock_rate: f64) {
        let idx = self.kind.index();

        for i in 1..hit_objects.len() {
            let (strain, is_single) =
                self.kind
                    .strain_of(&hit_objects[i], &hit_objects[i - 1], clock_rate);

            hit_objects[i].strains[idx] = strain;

            if is_single {
                hit_objects[i - 1].is_single = true;
            }
        }
    }

    /// Split the map into sections and store the highest strain of each.
    pub(crate) fn collect_peaks(&mut self, hit_objects: &[HitObject], clock_rate: f64) {
        let Some(first) = hit_objects.first() else {
            return;
        };

        let section_len = SECTION_LEN * clock_rate;
        let mut current_section_end = (first.start_time / section_len).ceil() * section_len;
        let mut prev: Option<&HitObject> = None;

        for h in hit_objects {
            while h.start_time > current_section_end {
                self.save_current_peak();
                self.start_new_section_from(current_section_end, prev);

                let next_section_end = current_section_end + section_len;

                current_section_end = if self.current_section_peak > 0.0
                    && next_section_end > current_section_end
                {
                    next_section_end
                } else {
                    // fully decayed sections only add zero peaks, skip to the object's section
                    let aligned = (h.start_time / section_len).ceil() * section_len;

                    next_section_end.max(aligned).max(h.start_time)
                };
            }

            self.current_section_peak = self.current_section_peak.max(h.strains[self.kind.index()]);
            prev = Some(h);
        }

        self.save_current_peak();
    }

    #[inline]
    fn save_current_peak(&mut self) {
        self.strain_peaks.push(self.current_section_peak);
    }

    #[inline]
    fn start_new_section_from(&mut self, time: f64, prev: Option<&HitObject>) {
        self.current_section_peak = prev.map_or(0.0, |prev| {
            let decay = self
                .kind
                .strain_decay_base()
                .powf((time - prev.start_time) / 1000.0);

            prev.strains[self.kind.index()] * decay
        });
    }

    /// Weighted sum of all section peaks, strongest first.
    pub(crate) fn difficulty_value(&mut self) -> f64 {
        let mut difficulty = 0.0;
        let mut weight = 1.0;

        self.strain_peaks
            .sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

        for &strain in self.strain_peaks.iter() {
            difficulty += strain * weight;
            weight *= DECAY_WEIGHT;
        }

        difficulty
    }
}
