mod control_point;
mod error;
mod hitobject;
mod pos2;
mod reader;
mod slider_state;

pub use control_point::TimingPoint;
pub use error::{ParseError, ParseResult, ParseWarning, ParseWarningKind};
pub use hitobject::{HitObject, HitObjectKind};
pub use pos2::Pos2;

use reader::FileReader;
use slider_state::SliderState;

use std::fmt;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::io::Read;

#[cfg(feature = "async_tokio")]
use tokio::io::AsyncRead as Read;

#[cfg(feature = "async_std")]
use async_std::io::Read;

macro_rules! next_field {
    ($opt:expr, $name:literal) => {
        $opt.ok_or(ParseWarningKind::MissingField($name))?
    };
}

macro_rules! validate_float {
    ($x:expr) => {{
        let x: f64 = $x;

        if x.is_finite() {
            x
        } else {
            return Err(ParseWarningKind::NonFiniteNumber);
        }
    }};
}

/// The game mode a map was made for.
///
/// Maps of any mode other than osu!standard are still parsed but
/// calculators will refuse them.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    #[default]
    Standard,
    /// Any other mode, holding the raw `Mode` value.
    Other(u32),
}

impl From<u32> for GameMode {
    #[inline]
    fn from(mode: u32) -> Self {
        match mode {
            0 => Self::Standard,
            other => Self::Other(other),
        }
    }
}

/// A parsed `.osu` file.
#[derive(Clone, Debug)]
pub struct Beatmap {
    pub mode: GameMode,
    pub format_version: u32,

    pub title: String,
    pub title_unicode: String,
    pub artist: String,
    pub artist_unicode: String,
    pub creator: String,
    /// Difficulty name.
    pub version: String,

    pub n_circles: u32,
    pub n_sliders: u32,
    pub n_spinners: u32,

    pub hp: f64,
    pub cs: f64,
    pub od: f64,
    /// Equals `od` if the file does not specify an approach rate.
    pub ar: f64,
    pub slider_velocity: f64,
    pub tick_rate: f64,

    pub hit_objects: Vec<HitObject>,
    pub timing_points: Vec<TimingPoint>,
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            mode: GameMode::Standard,
            format_version: 1,

            title: String::new(),
            title_unicode: String::new(),
            artist: String::new(),
            artist_unicode: String::new(),
            creator: String::new(),
            version: String::new(),

            n_circles: 0,
            n_sliders: 0,
            n_spinners: 0,

            hp: 5.0,
            cs: 5.0,
            od: 5.0,
            ar: 5.0,
            slider_velocity: 1.0,
            tick_rate: 1.0,

            hit_objects: Vec::new(),
            timing_points: Vec::new(),
        }
    }
}

pub(crate) const OSU_FILE_HEADER: &str = "file format v";

impl Beatmap {
    const CIRCLE_FLAG: i64 = 1 << 0;
    const SLIDER_FLAG: i64 = 1 << 1;
    const SPINNER_FLAG: i64 = 1 << 3;

    /// Parse a map from the given source.
    ///
    /// Lines that cannot be understood are skipped and reported as
    /// [`ParseWarning`]s, only a failing reader aborts.
    #[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
    pub fn parse<R: Read>(input: R) -> ParseResult<(Self, Vec<ParseWarning>)> {
        let mut reader = FileReader::new(input);
        let mut parser = Parser::default();

        while reader.next_line()? != 0 {
            parser.feed_bytes(reader.bytes());
        }

        Ok(parser.finish())
    }

    /// Parse a map from the given source.
    ///
    /// Lines that cannot be understood are skipped and reported as
    /// [`ParseWarning`]s, only a failing reader aborts.
    #[cfg(any(feature = "async_std", feature = "async_tokio"))]
    pub async fn parse<R: Read + Unpin>(input: R) -> ParseResult<(Self, Vec<ParseWarning>)> {
        let mut reader = FileReader::new(input);
        let mut parser = Parser::default();

        while reader.next_line().await? != 0 {
            parser.feed_bytes(reader.bytes());
        }

        Ok(parser.finish())
    }

    /// Parse a map that is already in memory.
    pub fn parse_str(input: &str) -> (Self, Vec<ParseWarning>) {
        let mut parser = Parser::default();

        for line in input.lines() {
            parser.feed_line(line);
        }

        parser.finish()
    }

    /// The maximum achievable combo, counting slider heads, ticks, repeats, and tails.
    pub fn max_combo(&self) -> u32 {
        let mut state = SliderState::new(self);

        self.hit_objects
            .iter()
            .map(|h| match h.kind {
                HitObjectKind::Slider { pixel_len, repeats } => {
                    state.count_ticks(h.start_time, pixel_len, repeats)
                }
                HitObjectKind::Circle | HitObjectKind::Spinner => 1,
            })
            .fold(0, u32::saturating_add)
    }
}

impl fmt::Display for Beatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} - {} [{}] mapped by {}",
            self.artist, self.title, self.version, self.creator
        )?;

        writeln!(
            f,
            "AR{} OD{} CS{} HP{}",
            self.ar, self.od, self.cs, self.hp
        )?;

        write!(
            f,
            "{} circles, {} sliders, {} spinners, {} max combo",
            self.n_circles,
            self.n_sliders,
            self.n_spinners,
            self.max_combo()
        )
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Section {
    #[default]
    None,
    General,
    Metadata,
    Difficulty,
    TimingPoints,
    HitObjects,
}

impl Section {
    #[inline]
    fn from_name(s: &str) -> Self {
        match s {
            "General" => Self::General,
            "Metadata" => Self::Metadata,
            "Difficulty" => Self::Difficulty,
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::None,
        }
    }
}

/// Single-pass state machine turning lines into a [`Beatmap`].
#[derive(Default)]
struct Parser {
    map: Beatmap,
    warnings: Vec<ParseWarning>,
    section: Section,
    ar: Option<f64>,
    line_nmbr: usize,
}

impl Parser {
    fn feed_bytes(&mut self, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.feed_line(line),
            Err(_) => {
                self.line_nmbr += 1;
                let content = String::from_utf8_lossy(bytes);
                self.warn(content.trim_end(), ParseWarningKind::InvalidUtf8);
            }
        }
    }

    fn feed_line(&mut self, raw: &str) {
        self.line_nmbr += 1;

        let raw = if self.line_nmbr == 1 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };

        // comments in the way the game client treats them
        if raw.starts_with(' ') || raw.starts_with('_') {
            return;
        }

        let line = raw.trim();

        if line.is_empty() || line.starts_with("//") {
            return;
        }

        if line.starts_with('[') && line.ends_with(']') {
            self.section = Section::from_name(&line[1..line.len() - 1]);

            return;
        }

        let res = match self.section {
            Section::General => self.parse_general(line),
            Section::Metadata => self.parse_metadata(line),
            Section::Difficulty => self.parse_difficulty(line),
            Section::TimingPoints => self.parse_timing_point(line),
            Section::HitObjects => self.parse_hit_object(line),
            Section::None => self.parse_format_version(line),
        };

        if let Err(kind) = res {
            self.warn(line, kind);
        }
    }

    fn finish(self) -> (Beatmap, Vec<ParseWarning>) {
        let Self {
            mut map,
            warnings,
            ar,
            ..
        } = self;

        map.ar = ar.unwrap_or(map.od);

        (map, warnings)
    }

    fn warn(&mut self, line: &str, kind: ParseWarningKind) {
        tracing::warn!(line = self.line_nmbr, content = line, "{kind}");

        self.warnings.push(ParseWarning {
            line: self.line_nmbr,
            content: line.to_owned(),
            kind,
        });
    }

    fn parse_format_version(&mut self, line: &str) -> Result<(), ParseWarningKind> {
        if let Some(idx) = line.find(OSU_FILE_HEADER) {
            self.map.format_version = line[idx + OSU_FILE_HEADER.len()..].trim().parse()?;
        }

        Ok(())
    }

    fn parse_general(&mut self, line: &str) -> Result<(), ParseWarningKind> {
        let (key, value) = split_colon(line).ok_or(ParseWarningKind::BadLine)?;

        if key == "Mode" {
            self.map.mode = GameMode::from(value.parse::<u32>()?);
        }

        Ok(())
    }

    fn parse_metadata(&mut self, line: &str) -> Result<(), ParseWarningKind> {
        let (key, value) = split_colon(line).ok_or(ParseWarningKind::BadLine)?;

        let field = match key {
            "Title" => &mut self.map.title,
            "TitleUnicode" => &mut self.map.title_unicode,
            "Artist" => &mut self.map.artist,
            "ArtistUnicode" => &mut self.map.artist_unicode,
            "Creator" => &mut self.map.creator,
            "Version" => &mut self.map.version,
            _ => return Ok(()),
        };

        value.clone_into(field);

        Ok(())
    }

    fn parse_difficulty(&mut self, line: &str) -> Result<(), ParseWarningKind> {
        let (key, value) = split_colon(line).ok_or(ParseWarningKind::BadLine)?;

        match key {
            "CircleSize" => self.map.cs = value.parse()?,
            "OverallDifficulty" => self.map.od = value.parse()?,
            "ApproachRate" => self.ar = Some(value.parse()?),
            "HPDrainRate" => self.map.hp = value.parse()?,
            "SliderMultiplier" => self.map.slider_velocity = value.parse()?,
            "SliderTickRate" => self.map.tick_rate = value.parse()?,
            _ => {}
        }

        Ok(())
    }

    fn parse_timing_point(&mut self, line: &str) -> Result<(), ParseWarningKind> {
        let mut split = line.split(',').map(str::trim);

        let time = validate_float!(next_field!(split.next(), "time").parse()?);
        let beat_len = next_field!(split.next(), "beat length").parse()?;

        let change = match split.nth(4) {
            Some(uninherited) => uninherited.parse::<i64>()? != 0,
            None => true,
        };

        if split.nth(1).is_some() {
            self.warn(line, ParseWarningKind::TrailingValues);
        }

        self.map.timing_points.push(TimingPoint {
            time,
            beat_len,
            change,
        });

        Ok(())
    }

    fn parse_hit_object(&mut self, line: &str) -> Result<(), ParseWarningKind> {
        let mut split = line.split(',').map(str::trim);

        let pos = Pos2 {
            x: next_field!(split.next(), "x").parse()?,
            y: next_field!(split.next(), "y").parse()?,
        };

        let time = validate_float!(next_field!(split.next(), "time").parse()?);
        let kind: i64 = next_field!(split.next(), "type").parse()?;
        next_field!(split.next(), "hitsound");

        if !(0..=255).contains(&kind) {
            return Err(ParseWarningKind::InvalidObjectType(kind));
        }

        let kind = if kind & Beatmap::SPINNER_FLAG > 0 {
            HitObjectKind::Spinner
        } else if kind & Beatmap::SLIDER_FLAG > 0 {
            // skip the curve points
            next_field!(split.next(), "curve");
            let repeats = next_field!(split.next(), "repeats").parse()?;

            if repeats == 0 {
                return Err(ParseWarningKind::NoSliderSpans);
            }

            let pixel_len = next_field!(split.next(), "length").parse()?;

            HitObjectKind::Slider { pixel_len, repeats }
        } else if kind & Beatmap::CIRCLE_FLAG > 0 {
            HitObjectKind::Circle
        } else {
            return Err(ParseWarningKind::InvalidObjectType(kind));
        };

        // objects hold at most 11 values
        let used = match kind {
            HitObjectKind::Slider { .. } => 8,
            HitObjectKind::Circle | HitObjectKind::Spinner => 5,
        };

        if split.nth(11 - used).is_some() {
            self.warn(line, ParseWarningKind::TrailingValues);
        }

        match kind {
            HitObjectKind::Circle => self.map.n_circles += 1,
            HitObjectKind::Slider { .. } => self.map.n_sliders += 1,
            HitObjectKind::Spinner => self.map.n_spinners += 1,
        }

        self.map.hit_objects.push(HitObject::new(pos, time, kind));

        Ok(())
    }
}

#[inline]
fn split_colon(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}
