use oppai_pp::{Beatmap, GameMode, HitObjectKind, ParseWarningKind};

mod common;

use common::MAP;

fn assert_fixture(map: &Beatmap) {
    assert_eq!(map.mode, GameMode::Standard);
    assert_eq!(map.format_version, 14);

    assert_eq!(map.title, "Synthetic");
    assert_eq!(map.artist, "Tester");
    assert_eq!(map.creator, "someone");
    assert_eq!(map.version, "Insane: Extra");

    assert_eq!(map.n_circles, 2);
    assert_eq!(map.n_sliders, 2);
    assert_eq!(map.n_spinners, 1);
    assert_eq!(map.hit_objects.len(), 5);
    assert_eq!(map.timing_points.len(), 2);

    assert!((map.cs - 4.0).abs() <= f64::EPSILON);
    assert!((map.od - 8.0).abs() <= f64::EPSILON);
    assert!((map.ar - 9.0).abs() <= f64::EPSILON);
    assert!((map.hp - 5.0).abs() <= f64::EPSILON);
    assert!((map.slider_velocity - 1.4).abs() <= f64::EPSILON);
    assert!((map.tick_rate - 1.0).abs() <= f64::EPSILON);

    assert!(map.timing_points[0].change);
    assert!(!map.timing_points[1].change);
    assert!((map.timing_points[1].sv_multiplier() - 2.0).abs() <= f64::EPSILON);

    assert!(map.hit_objects[0].is_circle());
    assert!(map.hit_objects[4].is_spinner());

    assert_eq!(
        map.hit_objects[3].kind,
        HitObjectKind::Slider {
            pixel_len: 280.0,
            repeats: 2
        }
    );

    assert_eq!(map.max_combo(), 8);
}

mod sync {
    use super::*;

    #[test]
    #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
    fn parses_fixture() {
        let (map, warnings) = test_map!(MAP);

        assert!(warnings.is_empty(), "{warnings:?}");
        assert_fixture(&map);
    }

    #[test]
    fn parse_str_matches_reader() {
        let (map, warnings) = Beatmap::parse_str(MAP);

        assert!(warnings.is_empty(), "{warnings:?}");
        assert_fixture(&map);
    }
}

#[cfg(feature = "async_tokio")]
mod async_tokio {
    use super::*;
    use tokio::runtime::Builder as RuntimeBuilder;

    #[test]
    fn parses_fixture() {
        RuntimeBuilder::new_current_thread()
            .build()
            .expect("could not start runtime")
            .block_on(async {
                let (map, warnings) = test_map!(MAP);

                assert!(warnings.is_empty(), "{warnings:?}");
                assert_fixture(&map);
            });
    }
}

#[cfg(feature = "async_std")]
mod async_std_rt {
    use super::*;

    #[test]
    fn parses_fixture() {
        async_std::task::block_on(async {
            let (map, warnings) = test_map!(MAP);

            assert!(warnings.is_empty(), "{warnings:?}");
            assert_fixture(&map);
        });
    }
}

#[test]
fn malformed_object_is_skipped() {
    let input = MAP.replace("448,64,500,1,0,0:0:0:0:", "448,64,abc,1,0,0:0:0:0:");
    let (map, warnings) = Beatmap::parse_str(&input);

    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0].kind, ParseWarningKind::InvalidFloat(_)));
    assert_eq!(warnings[0].content, "448,64,abc,1,0,0:0:0:0:");

    assert_eq!(map.n_circles, 1);
    assert_eq!(map.n_sliders, 2);
    assert_eq!(map.n_spinners, 1);
    assert_eq!(map.hit_objects.len(), 4);
}

#[test]
fn warnings_carry_line_numbers() {
    let input = "osu file format v14\n\n[HitObjects]\n0,0,0,1,0\n0,0\n";
    let (_, warnings) = Beatmap::parse_str(input);

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, 5);
    assert_eq!(warnings[0].kind, ParseWarningKind::MissingField("time"));
}

#[test]
fn invalid_utf8_line() {
    let mut input = b"[HitObjects]\n0,0,0,1,0\n".to_vec();
    input.extend_from_slice(&[0xFF, 0xFE, b'\n']);
    input.extend_from_slice(b"0,0,100,1,0\n");

    #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
    {
        let (map, warnings) = Beatmap::parse(input.as_slice()).unwrap();

        assert_eq!(map.hit_objects.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ParseWarningKind::InvalidUtf8);
    }
}

#[test]
fn older_format_counts_fewer_ticks() {
    let input = MAP.replace("file format v14", "file format v7");
    let (map, _) = Beatmap::parse_str(&input);

    assert_eq!(map.format_version, 7);
    assert_eq!(map.max_combo(), 10);
}

#[test]
fn tick_rate_adds_combo() {
    let input = MAP.replace("SliderTickRate:1", "SliderTickRate:4");
    let (map, _) = Beatmap::parse_str(&input);

    // 3 ticks on the first slider, 3 per span on the second
    assert_eq!(map.max_combo(), 17);
}

#[test]
fn slider_without_spans_is_skipped() {
    let (map, warnings) = Beatmap::parse_str("[HitObjects]\n0,0,0,2,0,L|1:1,0,100\n0,0,500,1,0\n");

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, ParseWarningKind::NoSliderSpans);
    assert_eq!(map.n_sliders, 0);
    assert_eq!(map.hit_objects.len(), 1);
    assert_eq!(map.max_combo(), 1);
}

#[test]
fn degenerate_slider_velocity() {
    let input = "[Difficulty]\nSliderMultiplier:0\n\n[HitObjects]\n0,0,0,2,0,L|1:1,2,100\n";
    let (map, warnings) = Beatmap::parse_str(input);

    assert!(warnings.is_empty(), "{warnings:?}");

    // head, repeat, and tail without any ticks
    assert_eq!(map.max_combo(), 3);
}

#[test]
fn extreme_slider_lengths() {
    let input = "[HitObjects]\n\
        0,0,0,2,0,L|1:1,2,1e300\n\
        0,0,100,2,0,L|1:1,2,1e300\n\
        0,0,200,2,0,L|1:1,2,-1e300\n";
    let (map, warnings) = Beatmap::parse_str(input);

    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(map.n_sliders, 3);
    assert_eq!(map.max_combo(), u32::MAX);
}

/// Write the fields the parser understands back into `.osu` syntax.
fn serialize(map: &Beatmap) -> String {
    use std::fmt::Write;

    let mut out = format!(
        "osu file format v{}\n\n[General]\nMode: 0\n\n[Metadata]\nTitle:{}\nArtist:{}\nCreator:{}\nVersion:{}\n\n",
        map.format_version, map.title, map.artist, map.creator, map.version
    );

    let _ = write!(
        out,
        "[Difficulty]\nHPDrainRate:{}\nCircleSize:{}\nOverallDifficulty:{}\nApproachRate:{}\nSliderMultiplier:{}\nSliderTickRate:{}\n\n[TimingPoints]\n",
        map.hp, map.cs, map.od, map.ar, map.slider_velocity, map.tick_rate
    );

    for tp in map.timing_points.iter() {
        let _ = writeln!(
            out,
            "{},{},4,2,0,100,{},0",
            tp.time,
            tp.beat_len,
            u8::from(tp.change)
        );
    }

    out.push_str("\n[HitObjects]\n");

    for h in map.hit_objects.iter() {
        let _ = match h.kind {
            HitObjectKind::Circle => writeln!(out, "{},{},{},1,0", h.pos.x, h.pos.y, h.start_time),
            HitObjectKind::Slider { pixel_len, repeats } => writeln!(
                out,
                "{},{},{},2,0,L|0:0,{repeats},{pixel_len}",
                h.pos.x, h.pos.y, h.start_time
            ),
            HitObjectKind::Spinner => {
                writeln!(out, "{},{},{},8,0,0", h.pos.x, h.pos.y, h.start_time)
            }
        };
    }

    out
}

#[test]
fn reparse_serialized() {
    let (map, _) = Beatmap::parse_str(MAP);
    let (reparsed, warnings) = Beatmap::parse_str(&serialize(&map));

    assert!(warnings.is_empty(), "{warnings:?}");

    assert_eq!(reparsed.format_version, map.format_version);
    assert_eq!(reparsed.version, map.version);
    assert_eq!(reparsed.timing_points, map.timing_points);
    assert_eq!(reparsed.hit_objects, map.hit_objects);
    assert_eq!(reparsed.n_circles, map.n_circles);
    assert_eq!(reparsed.n_sliders, map.n_sliders);
    assert_eq!(reparsed.n_spinners, map.n_spinners);
    assert!((reparsed.ar - map.ar).abs() <= f64::EPSILON);
    assert!((reparsed.slider_velocity - map.slider_velocity).abs() <= f64::EPSILON);
    assert_eq!(reparsed.max_combo(), map.max_combo());
}
