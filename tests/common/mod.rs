#![allow(unused)]

use oppai_pp::Beatmap;

/// Parse `$input` through the reader based `Beatmap::parse`,
/// awaiting it if an async feature is enabled.
#[macro_export]
#[rustfmt::skip]
macro_rules! test_map {
    ($input:expr) => {{
        #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
        { oppai_pp::Beatmap::parse($input.as_bytes()).unwrap() }
        #[cfg(any(feature = "async_tokio", feature = "async_std"))]
        { oppai_pp::Beatmap::parse($input.as_bytes()).await.unwrap() }
    }};
}

/// Sliders, an inherited timing point, a spinner, comments,
/// and a section that's of no interest.
pub const MAP: &str = "\u{feff}osu file format v14

[General]
AudioFilename: audio.mp3
Mode: 0

[Metadata]
Title:Synthetic
TitleUnicode:Synthetic
Artist:Tester
ArtistUnicode:Tester
Creator:someone
Version:Insane: Extra

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:8
ApproachRate:9
SliderMultiplier:1.4
SliderTickRate:1

[Events]
//Background and Video events
0,0,\"bg.jpg\",0,0

[TimingPoints]
0,500,4,2,0,100,1,0
2000,-50,4,2,0,100,0,0

[HitObjects]
64,64,0,1,0,0:0:0:0:
448,64,500,1,0,0:0:0:0:
448,320,1000,2,0,L|448:180,1,140
64,320,2000,2,0,B|64:100|200:100,2,280
256,192,3000,12,0,4000,0:0:0:0:
";

/// Three circles 300ms apart.
pub const THREE_CIRCLES: &str = "osu file format v14

[General]
Mode: 0

[Difficulty]
CircleSize:4
OverallDifficulty:8
ApproachRate:9

[HitObjects]
100,100,0,1,0
250,150,300,1,0
400,100,600,1,0
";

/// Alternating streams and jumps, long enough for meaningful star ratings.
pub fn long_map() -> Beatmap {
    let mut input = String::from(
        "osu file format v14\n\n[Difficulty]\nCircleSize:4\nOverallDifficulty:9\nApproachRate:9.5\n\n[HitObjects]\n",
    );

    for i in 0..600 {
        let (x, y) = if (i / 16) % 2 == 0 {
            (200 + (i % 4) * 20, 180 + (i % 3) * 15)
        } else {
            ((i % 2) * 400 + 50, (i % 3) * 150 + 40)
        };

        input.push_str(&format!("{x},{y},{},1,0\n", i * 120));
    }

    let (map, warnings) = Beatmap::parse_str(&input);
    assert!(warnings.is_empty(), "{warnings:?}");

    map
}

#[track_caller]
pub fn assert_eq_float<F: Float>(a: F, b: F) {
    assert!((a - b).abs() < F::EPSILON, "{a} != {b}")
}

/// Trait to provide flexibility in the `assert_eq_float` function.
pub trait Float: Copy + std::fmt::Display + std::ops::Sub<Output = Self> + PartialOrd {
    const EPSILON: Self;

    fn abs(self) -> Self;
}

macro_rules! impl_float {
    ( $( $ty:ty )* ) => {
        $(
            impl Float for $ty {
                const EPSILON: Self = <$ty>::EPSILON;

                fn abs(self) -> Self {
                    <$ty>::abs(self)
                }
            }
        )*
    }
}

impl_float!(f32 f64);
