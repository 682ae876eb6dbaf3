use ingredientiq::provider::{FileProvider, LoadError, SnapshotHandle, load_dictionary, load_options};
use ingredientiq::{Options, ScoreWeights, SplitRule, Status};
use std::fs;
use std::sync::Arc;

const V1: &str = r#"{
    "version": "db.v1",
    "items": [
        {"inci": "Aqua", "aliases": ["Water"], "status": "safe"},
        {"inci": "Methylparaben", "status": "avoid", "why": "Endocrine concerns."}
    ]
}"#;

const V2: &str = r#"{
    "version": "db.v2",
    "items": [
        {"inci": "Aqua", "aliases": ["Water"], "status": "safe"},
        {"inci": "Methylparaben", "status": "caution", "why": "Re-reviewed; fine at low concentration."},
        "Niacinamide"
    ]
}"#;

#[test]
fn file_provider_caches_until_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    fs::write(&path, V1).unwrap();

    let provider = FileProvider::new(&path);
    let first = provider.load().unwrap();
    assert_eq!(first.version, "db.v1");

    let again = provider.load().unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert!(provider.load_if_changed().unwrap().is_none());

    fs::write(&path, V2).unwrap();
    let changed = provider.load_if_changed().unwrap().expect("file changed on disk");
    assert_eq!(changed.version, "db.v2");
    assert_eq!(changed.entries.len(), 3);
    assert_eq!(changed.entries[2].status, Status::Unknown);
}

#[test]
fn snapshot_reload_swaps_whole_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    fs::write(&path, V1).unwrap();

    let provider = FileProvider::new(&path);
    let handle = SnapshotHandle::from_provider(&provider, Options::default()).unwrap();
    let before = handle.load();
    assert_eq!(before.analyze("Water, Methylparaben").counts.red, 1);

    assert!(!handle.reload_from(&provider, &Options::default()).unwrap());

    fs::write(&path, V2).unwrap();
    assert!(handle.reload_from(&provider, &Options::default()).unwrap());

    let after = handle.load();
    let out = after.analyze("Water, Methylparaben");
    assert_eq!(out.dictionary_version, "db.v2");
    assert_eq!(out.counts.yellow, 1);

    // A snapshot already handed out keeps answering from its own dictionary.
    assert_eq!(before.analyze("Water, Methylparaben").dictionary_version, "db.v1");
}

#[test]
fn failed_reload_keeps_current_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    fs::write(&path, V1).unwrap();

    let provider = FileProvider::new(&path);
    let handle = SnapshotHandle::from_provider(&provider, Options::default()).unwrap();

    fs::write(&path, "{ this is not json").unwrap();
    let err = handle.reload_from(&provider, &Options::default()).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
    assert_eq!(handle.load().version(), "db.v1");
}

#[test]
fn replace_returns_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    fs::write(&path, V1).unwrap();

    let v1 = load_dictionary(&path).unwrap();
    fs::write(&path, V2).unwrap();
    let v2 = load_dictionary(&path).unwrap();

    let handle = SnapshotHandle::new(ingredientiq::Engine::new(&v1, Options::default()));
    let previous = handle.replace(ingredientiq::Engine::new(&v2, Options::default()));

    assert_eq!(previous.version(), "db.v1");
    assert_eq!(handle.load().version(), "db.v2");
}

#[test]
fn options_load_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredientiq.toml");
    fs::write(
        &path,
        r#"
split = "semicolon_preferred"

[weights]
red = 15.0
yellow = 5.0
green_bonus = 0.0
green_cap = 0

[policy]
elevate_fragrance_allergens = false

[extra_common_aliases]
"shea butter" = "butyrospermum parkii butter"
"#,
    )
    .unwrap();

    let options = load_options(&path).unwrap();
    assert_eq!(options.split, SplitRule::SemicolonPreferred);
    assert_eq!(options.weights, ScoreWeights::penalty_only());
    assert!(options.policy.undisclosed_mixtures);
    assert!(!options.policy.elevate_fragrance_allergens);
    assert_eq!(options.extra_common_aliases["shea butter"], "butyrospermum parkii butter");
}

#[test]
fn load_errors_carry_their_cause() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_dictionary(&missing), Err(LoadError::Io { .. })));
    assert!(matches!(FileProvider::new(&missing).load(), Err(LoadError::Io { .. })));

    let bad_toml = dir.path().join("bad.toml");
    fs::write(&bad_toml, "split = [").unwrap();
    assert!(matches!(load_options(&bad_toml), Err(LoadError::Config(_))));
}
