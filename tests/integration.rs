use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use rand::SeedableRng;
use rand::rngs::StdRng;

use pizza_clock::settings::{self, ClockTextPosition, Settings, Theme};
use pizza_clock::theme::{HourMappingMode, ThemeDefinition};
use pizza_clock::{manifest, token};

/// Unique scratch directory for a test (removed by the test itself).
fn scratch_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("pizza_clock_{label}_{nanos}"));
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

#[test]
fn manifest_build_load_choose_pipeline() {
    let assets = scratch_dir("assets");
    for name in [
        "pizza_12p_0p_000.webp",
        "pizza_12p_0p_001.webp",
        "pizza_12p_5p_000.webp",
        "notes.txt", // uncategorized, must be skipped
    ] {
        fs::write(assets.join(name), b"img").unwrap();
    }

    let definition = manifest::build(&assets, Theme::Pizza12p, "assets/pizza_12p").unwrap();
    assert_eq!(definition.files().len(), 3);
    assert!(
        definition
            .files()
            .iter()
            .all(|f| f.path.starts_with("assets/pizza_12p/"))
    );

    // Write the manifest out and load it back, as the viewer would
    let manifest_path = assets.join("pizza_12p.json");
    fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&definition).unwrap(),
    )
    .unwrap();
    let loaded = manifest::load(manifest_path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, definition);

    // Hour 0 resolves to category "0p": both 0p assets are candidates
    let mut rng = StdRng::seed_from_u64(1);
    let bg = loaded
        .choose_background(0, HourMappingMode::IncreaseDecrease, &mut rng)
        .unwrap();
    assert_eq!(bg.category, "0p");
    assert!(!bg.flip);

    // Hour 17 needs "7p": no asset, no background change
    assert!(
        loaded
            .choose_background(17, HourMappingMode::IncreaseDecrease, &mut rng)
            .is_none()
    );

    fs::remove_dir_all(assets).ok();
}

#[test]
fn manifest_build_is_deterministic() {
    let assets = scratch_dir("det");
    for name in ["pizza_12p_2p_001.webp", "pizza_12p_1p_000.webp"] {
        fs::write(assets.join(name), b"img").unwrap();
    }

    let a = manifest::build(&assets, Theme::Pizza12p, "").unwrap();
    let b = manifest::build(&assets, Theme::Pizza12p, "").unwrap();
    assert_eq!(a, b);
    // Sorted by filename regardless of directory iteration order
    assert_eq!(a.files()[0].category, "1p");
    assert_eq!(a.files()[1].category, "2p");

    fs::remove_dir_all(assets).ok();
}

#[test]
fn token_round_trip_through_public_api() {
    let original = Settings {
        theme: Theme::Circular,
        clock_text_position: ClockTextPosition::Center,
        font_size: 64.0,
        letter_spacing: 12.0,
        seconds_indicator_line_width: 3.0,
    };
    let link = token::share_link("https://clock.example/", &original);
    let (_, fragment) = link.split_once('#').unwrap();

    let raw = token::decode(fragment).unwrap();
    let restored = settings::validate(&raw).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn bad_token_leaves_settings_untouched() {
    // Caller policy: on decode failure, keep whatever settings were
    // current before the token arrived
    let current = Settings::default();
    let result = token::decode("not-valid-token");
    assert!(result.is_err());
    assert_eq!(current, Settings::default());
}

#[test]
fn circular_manifest_round_trip() {
    let assets = scratch_dir("circular");
    for name in ["circular_3p_000.webp", "circular_12p_000.webp"] {
        fs::write(assets.join(name), b"img").unwrap();
    }

    let definition = manifest::build(&assets, Theme::Circular, "").unwrap();
    assert!(matches!(definition, ThemeDefinition::Circular { .. }));
    assert_eq!(definition.files().len(), 2);

    let mut rng = StdRng::seed_from_u64(9);
    let bg = definition
        .choose_background(23, HourMappingMode::IncreaseDecrease, &mut rng)
        .unwrap();
    assert!(!bg.flip);

    fs::remove_dir_all(assets).ok();
}
