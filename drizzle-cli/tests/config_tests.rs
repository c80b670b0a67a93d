//! Tests for configuration loading and validation

use std::path::Path;

use drizzle_cli::config;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn load_steady_profile() {
    let mut system =
        config::load(Path::new("../profiles/steady.json")).expect("failed to load steady profile");

    assert_eq!(system.cycle_width, 60);
    assert_eq!(system.global_scale, 1.0);
    assert!(system.sources.contains_key("baseline"));

    system.init(SmallRng::seed_from_u64(1)).expect("init failed");
    let (total, by_source) = system.counts(0).unwrap();
    assert!(total >= 0);
    assert_eq!(by_source.len(), 1);
}

#[test]
fn load_bursty_profile() {
    let mut system =
        config::load(Path::new("../profiles/bursty.yaml")).expect("failed to load bursty profile");

    assert_eq!(system.sources.len(), 3);
    assert_eq!(system.sources["burst"].scale, Some(2.0));

    system.init(SmallRng::seed_from_u64(7)).expect("init failed");

    // The burst window [10, 20) only contributes mid-cycle.
    for t in 0..60 {
        let (_, by_source) = system.counts(t).unwrap();
        let burst_active = by_source.contains_key("burst");
        assert_eq!(burst_active, (10..20).contains(&t), "tick {t}");
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "cycle_width = 60").unwrap();

    let err = config::load(&path).unwrap_err();
    assert!(err.to_string().contains("unknown config file extension"), "got {err}");
}

#[test]
fn missing_file_is_rejected() {
    let err = config::load(Path::new("/nonexistent/drizzle.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"), "got {err}");
}

#[test]
fn malformed_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{\"sources\": ").unwrap();

    let err = config::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse"), "got {err}");
}

#[test]
fn unknown_top_level_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"sources": {}, "cycle": 60}"#).unwrap();

    assert!(config::load(&path).is_err());
}

#[test]
fn ambiguous_distribution_fails_at_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "sources": {
                "muddled": {
                    "count": {
                        "poisson": {"lambda": 5.0},
                        "normal": {"mu": 0.0, "sigma": 1.0}
                    }
                }
            }
        }"#,
    )
    .unwrap();

    // The file deserializes; the exactly-one-family invariant is
    // enforced by System::init, before the first tick.
    let mut system = config::load(&path).expect("load should succeed");
    let err = system.init(SmallRng::seed_from_u64(1)).unwrap_err();
    assert!(err.to_string().contains("exactly one"), "got {err}");
}
