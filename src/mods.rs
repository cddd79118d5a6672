use std::{fmt, ops, str::FromStr};

use crate::PpError;

macro_rules! impl_mods {
    ($( $func_name:ident, $const_name:ident; )*) => {
        $(
            #[inline]
            pub const fn $func_name(self) -> bool {
                self.0 & Self::$const_name.0 > 0
            }
        )*
    };
}

/// Set of gameplay modifiers, stored in the bit layout of the osu! API.
///
/// # Example
///
/// ```
/// use oppai_pp::Mods;
///
/// let mods = Mods::HIDDEN | Mods::DOUBLE_TIME;
///
/// assert_eq!(mods.bits(), 8 + 64);
/// assert_eq!(mods.to_string(), "HDDT");
/// assert_eq!("hddt".parse::<Mods>(), Ok(mods));
/// ```
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mods(u32);

impl Mods {
    pub const NONE: Self = Self(0);
    pub const NO_FAIL: Self = Self(1 << 0);
    pub const EASY: Self = Self(1 << 1);
    pub const TOUCH_DEVICE: Self = Self(1 << 2);
    pub const HIDDEN: Self = Self(1 << 3);
    pub const HARD_ROCK: Self = Self(1 << 4);
    pub const SUDDEN_DEATH: Self = Self(1 << 5);
    pub const DOUBLE_TIME: Self = Self(1 << 6);
    pub const HALF_TIME: Self = Self(1 << 8);
    pub const NIGHTCORE: Self = Self(1 << 9);
    pub const FLASHLIGHT: Self = Self(1 << 10);

    /// Mods that modify the speed or the base difficulty values of a map.
    pub const MAP_CHANGING: Self = Self(
        Self::EASY.0 | Self::HARD_ROCK.0 | Self::DOUBLE_TIME.0 | Self::HALF_TIME.0 | Self::NIGHTCORE.0,
    );

    const ACRONYMS: [(&'static str, Self); 10] = [
        ("NF", Self::NO_FAIL),
        ("EZ", Self::EASY),
        ("TD", Self::TOUCH_DEVICE),
        ("HD", Self::HIDDEN),
        ("HR", Self::HARD_ROCK),
        ("SD", Self::SUDDEN_DEATH),
        ("DT", Self::DOUBLE_TIME),
        ("HT", Self::HALF_TIME),
        ("NC", Self::NIGHTCORE),
        ("FL", Self::FLASHLIGHT),
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 > 0
    }

    /// Whether the mods modify speed, AR, OD, CS, or HP.
    #[inline]
    pub const fn change_map(self) -> bool {
        self.intersects(Self::MAP_CHANGING)
    }

    /// Clock rate multiplier. Nightcore counts as double time.
    #[inline]
    pub fn speed(self) -> f64 {
        let mut speed = 1.0;

        if self.dt() || self.nc() {
            speed *= 1.5;
        }

        if self.ht() {
            speed *= 0.75;
        }

        speed
    }

    /// Multiplier for AR, OD, and HP before any clamping.
    #[inline]
    pub fn od_ar_hp_multiplier(self) -> f64 {
        let mut multiplier = 1.0;

        if self.hr() {
            multiplier *= 1.4;
        }

        if self.ez() {
            multiplier *= 0.5;
        }

        multiplier
    }

    impl_mods! {
        nf, NO_FAIL;
        ez, EASY;
        td, TOUCH_DEVICE;
        hd, HIDDEN;
        hr, HARD_ROCK;
        sd, SUDDEN_DEATH;
        dt, DOUBLE_TIME;
        ht, HALF_TIME;
        nc, NIGHTCORE;
        fl, FLASHLIGHT;
    }
}

impl From<u32> for Mods {
    #[inline]
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<Mods> for u32 {
    #[inline]
    fn from(mods: Mods) -> Self {
        mods.0
    }
}

impl ops::BitOr for Mods {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Mods {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NM");
        }

        for (acronym, flag) in Self::ACRONYMS {
            if flag == Self::DOUBLE_TIME && self.nc() {
                continue;
            }

            if self.contains(flag) {
                f.write_str(acronym)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

impl FromStr for Mods {
    type Err = PpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('+').unwrap_or(s);

        if s.eq_ignore_ascii_case("NM") {
            return Ok(Self::NONE);
        }

        if s.len() % 2 != 0 || !s.is_ascii() {
            return Err(PpError::InvalidInput(format!("invalid mods `{s}`")));
        }

        let mut mods = Self::NONE;

        for i in (0..s.len()).step_by(2) {
            let acronym = &s[i..i + 2];

            let flag = Self::ACRONYMS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(acronym))
                .map(|(_, flag)| *flag)
                .ok_or_else(|| PpError::InvalidInput(format!("unknown mod `{acronym}`")))?;

            mods |= flag;

            if flag == Self::NIGHTCORE {
                mods |= Self::DOUBLE_TIME;
            }
        }

        Ok(mods)
    }
}
