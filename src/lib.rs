//! Library to parse osu!standard beatmaps and calculate their star rating
//! as well as the performance points (pp) of scores on them.
//!
//! The difficulty and pp formulas are those of the legacy pp system,
//! i.e. aim and speed strains weighted by jump spacing, and a pp value
//! combining aim, speed, and accuracy through a power mean.
//!
//! ## Usage
//!
//! ```
//! use oppai_pp::{Beatmap, Mods, OsuPP, OsuStars};
//!
//! # let input = "[HitObjects]\n0,0,0,1,0\n100,100,300,1,0\n";
//! # /*
//! let input = std::fs::read_to_string("./map.osu").unwrap();
//! # */
//! // Decode the map, malformed lines are reported as warnings
//! let (mut map, warnings) = Beatmap::parse_str(&input);
//!
//! for warning in warnings {
//!     eprintln!("{warning}");
//! }
//!
//! let mods = Mods::HIDDEN | Mods::HARD_ROCK;
//!
//! // Calculate difficulty attributes
//! let diff_attrs = OsuStars::new(&mut map).mods(mods).calculate().unwrap();
//!
//! // Calculate performance attributes, re-using the difficulty
//! let perf_attrs = OsuPP::from_map(&map)
//!     .attributes(diff_attrs)
//!     .mods(mods)
//!     .combo(2)
//!     .accuracy(99.2)
//!     .misses(0)
//!     .calculate()
//!     .unwrap();
//!
//! println!("Stars: {} | PP: {}", diff_attrs.total, perf_attrs.total_pp);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Synchronous parsing through [`std::io::Read`] |
//! | `async_tokio` | [`Beatmap::parse`] becomes async over a tokio `AsyncRead` | [`tokio`]
//! | `async_std` | [`Beatmap::parse`] becomes async over an async-std `Read` | [`async-std`]
//! | `serde` | `Serialize` and `Deserialize` for result types and [`Mods`] | [`serde`]
//!
//! Every parse warning is also logged through `tracing::warn`; finished
//! calculations are logged through `tracing::debug`.
//!
//! [`tokio`]: https://docs.rs/tokio
//! [`async-std`]: https://docs.rs/async-std
//! [`serde`]: https://docs.rs/serde

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[cfg(all(feature = "async_tokio", feature = "async_std"))]
compile_error!("features `async_tokio` and `async_std` are mutually exclusive");

/// Types for osu!standard calculations.
pub mod osu;

/// Beatmap model and `.osu` decoding.
pub mod parse;

mod accuracy;
mod attributes;
mod error;
mod mods;

pub use accuracy::{accuracy, round_to_hit_counts};
pub use attributes::BeatmapAttributes;
pub use error::{PpError, PpResult};
pub use mods::Mods;
pub use osu::{DifficultyAttributes, OsuPP, OsuStars, PerformanceResult, ScoreVersion};
pub use parse::{
    Beatmap, GameMode, HitObject, HitObjectKind, ParseError, ParseResult, ParseWarning,
    ParseWarningKind, Pos2, TimingPoint,
};
