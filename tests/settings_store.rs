use autoclicker::{CursorPolicy, PersistedSettings, SettingsStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new_with_path(dir.path().join("settings.json"));

    assert_eq!(store.load(), PersistedSettings::default());
    assert!(!store.path().exists());
}

#[test]
fn test_round_trip() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new_with_path(dir.path().join("settings.json"));

    for frequency in [1, 250, 1000] {
        for hotkey_index in [0, 8, 11] {
            for random_delay_value in [0, 1000] {
                for flags in 0..8u8 {
                    let settings = PersistedSettings {
                        frequency,
                        hotkey_index,
                        random_delay: flags & 1 != 0,
                        random_delay_value,
                        stay_on_top: flags & 2 != 0,
                        cursor_lock: flags & 4 != 0,
                    };

                    store.try_save(&settings).unwrap();
                    assert_eq!(store.try_load().unwrap(), settings);
                }
            }
        }
    }

    assert!(!dir.path().join("settings.tmp").exists());
}

#[test]
fn test_save_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new_with_path(dir.path().join("nested").join("settings.json"));

    store.save(&PersistedSettings::default());

    assert!(store.path().exists());
}

#[test]
fn test_written_json_uses_camel_case() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new_with_path(dir.path().join("settings.json"));

    store.try_save(&PersistedSettings::default()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();

    assert_eq!(json["frequency"], 10);
    assert_eq!(json["hotkeyIndex"], 8);
    assert_eq!(json["randomDelay"], false);
    assert_eq!(json["randomDelayValue"], 50);
    assert_eq!(json["stayOnTop"], false);
    assert_eq!(json["cursorLock"], false);
}

#[test]
fn test_corrupt_file_backed_up() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ this is not json").unwrap();

    let store = SettingsStore::new_with_path(&path);
    assert_eq!(store.load(), PersistedSettings::default());
    assert!(!path.exists());

    let backups: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("settings.json.corrupt."))
        .collect();

    assert_eq!(backups.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join(&backups[0])).unwrap(),
        "{ this is not json"
    );
}

#[test]
fn test_pascal_case_file_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "Frequency": 42,
            "HotkeyIndex": 0,
            "RandomDelay": true,
            "RandomDelayValue": 15
        }"#,
    )
    .unwrap();

    let settings = SettingsStore::new_with_path(&path).load();

    assert_eq!(settings.frequency, 42);
    assert_eq!(settings.hotkey().name(), "F1");
    assert!(settings.random_delay);
    assert_eq!(settings.random_delay_value, 15);
    assert!(!settings.stay_on_top);
    assert_eq!(settings.cursor_policy(), CursorPolicy::LivePosition);
}

#[test]
fn test_out_of_range_values_clamped_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"frequency": 0, "hotkeyIndex": 99, "randomDelayValue": 100000}"#,
    )
    .unwrap();

    let settings = SettingsStore::new_with_path(&path).load();

    assert_eq!(settings.frequency, 1);
    assert_eq!(settings.hotkey_index, 11);
    assert_eq!(settings.random_delay_value, 1000);
    assert!(path.exists());
}

#[test]
fn test_unknown_fields_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"frequency": 12, "theme": "dark"}"#).unwrap();

    assert_eq!(SettingsStore::new_with_path(&path).load().frequency, 12);
}
