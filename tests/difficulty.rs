use oppai_pp::{Beatmap, DifficultyAttributes, GameMode, Mods, OsuStars, PpError};

mod common;

use common::{long_map, THREE_CIRCLES};

#[test]
fn three_circles() {
    let (mut map, warnings) = Beatmap::parse_str(THREE_CIRCLES);
    assert!(warnings.is_empty());

    let attrs = OsuStars::new(&mut map).calculate().unwrap();

    assert!(attrs.total.is_finite());
    assert!(attrs.aim > 0.0);
    assert!(attrs.speed > 0.0);
    assert!(attrs.total >= attrs.aim.max(attrs.speed));

    // strains are written back into the map
    assert!(map.hit_objects[0].strains.iter().all(|&s| s == 0.0));
    assert!(map.hit_objects[1].strains.iter().all(|&s| s > 0.0));
    assert!(map.hit_objects[2].strains.iter().all(|&s| s > 0.0));
}

#[test]
fn repeated_calculation_is_stable() {
    let mut map = long_map();

    let first = OsuStars::new(&mut map).mods(Mods::DOUBLE_TIME).calculate().unwrap();
    let _ = OsuStars::new(&mut map).mods(Mods::HARD_ROCK).calculate().unwrap();
    let second = OsuStars::new(&mut map).mods(Mods::DOUBLE_TIME).calculate().unwrap();

    assert_eq!(first, second);
}

#[test]
fn empty_and_single() {
    let (mut map, _) = Beatmap::parse_str("");
    let attrs = OsuStars::new(&mut map).calculate().unwrap();
    assert_eq!(attrs, DifficultyAttributes::default());

    let (mut map, _) = Beatmap::parse_str("[HitObjects]\n256,192,500,1,0\n");
    let attrs = OsuStars::new(&mut map).calculate().unwrap();
    assert!(attrs.total.abs() <= f64::EPSILON);
    assert_eq!(attrs.singletap_count, 0);
}

#[test]
fn other_modes_are_rejected() {
    let input = THREE_CIRCLES.replace("Mode: 0", "Mode: 1");
    let (mut map, _) = Beatmap::parse_str(&input);

    assert_eq!(map.mode, GameMode::Other(1));

    let err = OsuStars::new(&mut map).calculate().unwrap_err();
    assert_eq!(err, PpError::UnsupportedMode(GameMode::Other(1)));
}

#[test]
fn circle_size_mods() {
    let mut map = long_map();

    let nomod = oppai_pp::osu::stars(&mut map, Mods::NONE).unwrap();
    let hr = oppai_pp::osu::stars(&mut map, Mods::HARD_ROCK).unwrap();
    let ez = oppai_pp::osu::stars(&mut map, Mods::EASY).unwrap();

    assert!(hr.aim > nomod.aim);
    assert!(ez.aim < nomod.aim);
}

#[test]
fn speed_mods() {
    let mut map = long_map();

    let nomod = OsuStars::new(&mut map).calculate().unwrap();
    let dt = OsuStars::new(&mut map).mods(Mods::DOUBLE_TIME).calculate().unwrap();
    let nc = OsuStars::new(&mut map).mods(Mods::NIGHTCORE).calculate().unwrap();
    let ht = OsuStars::new(&mut map).mods(Mods::HALF_TIME).calculate().unwrap();

    assert!(dt.total > nomod.total);
    assert!(ht.total < nomod.total);
    assert_eq!(dt, nc);
}

#[test]
fn singletap_counts() {
    let mut map = long_map();

    let nomod = OsuStars::new(&mut map).calculate().unwrap();
    assert_eq!(nomod.singletap_threshold_count, 0);
    assert!(nomod.singletap_count > 0);

    // 120ms become 160ms
    let ht = OsuStars::new(&mut map).mods(Mods::HALF_TIME).calculate().unwrap();
    assert_eq!(ht.singletap_threshold_count, 599);

    let custom = OsuStars::new(&mut map)
        .singletap_threshold(100.0)
        .calculate()
        .unwrap();
    assert_eq!(custom.singletap_threshold_count, 599);
}
