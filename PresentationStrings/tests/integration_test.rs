use pretty_assertions::assert_eq;
use presentation_strings::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const ENGLISH: &str = r#"/* Base language */
"Localization.LanguageName" = "English";
"Common.Cancel" = "Cancel";
"Common.Done" = "Done";
"Chat.Greeting" = "Hello, %@!";
"Chat.Pair" = "%2$@ and %1$@";
"Chat.Twice" = "%1$@ meets %1$@";
"Days_1" = "%@ day";
"Days_any" = "%@ days";
"#;

const RUSSIAN: &str = r#""Localization.LanguageName" = "Русский";
"Common.Cancel" = "Отмена";
"Days_1" = "%@ день";
"Days_3_10" = "%@ дня";
"Days_many" = "%@ дней";
"#;

const GERMAN_JSON: &str = r#"{
    "Localization.LanguageName": "Deutsch",
    "Common.Cancel": "Abbrechen",
    "Days_1": "%@ Tag",
    "Days_any": "%@ Tage"
}"#;

/// Lay out a bundle with en/ru as `.strings` and de as JSON, plus a mapping
/// built from the English dictionary
fn write_bundle(root: &Path) -> std::path::PathBuf {
    for (code, text) in [("en", ENGLISH), ("ru", RUSSIAN)] {
        let dir = root.join(format!("{code}.lproj"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Localizable.strings"), text).unwrap();
    }
    std::fs::write(root.join("de.json"), GERMAN_JSON).unwrap();

    let base = read_strings(root.join("en.lproj/Localizable.strings")).unwrap();
    let mapping = KeyMapping::from_base_strings(&base);
    let mapping_path = root.join("PresentationStrings.mapping");
    write_mapping(&mapping_path, &mapping).unwrap();
    mapping_path
}

fn open_store(root: &Path, selection: LanguageSelection) -> StringsStore {
    let mapping_path = write_bundle(root);
    StringsStore::open(
        Arc::new(KeyMappingCache::from_path(mapping_path)),
        StringsBundle::new(root),
        "en",
        selection,
    )
    .unwrap()
}

#[test]
fn test_mapping_built_from_base_strings() {
    let dir = tempdir().unwrap();
    let mapping = read_mapping(write_bundle(dir.path())).unwrap();

    let scalar_keys: Vec<_> = mapping.scalars.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(
        scalar_keys,
        vec![
            "Chat.Greeting",
            "Chat.Pair",
            "Chat.Twice",
            "Common.Cancel",
            "Common.Done",
            "Localization.LanguageName",
        ]
    );
    assert!(mapping.scalars[0].has_arguments);
    assert!(!mapping.scalars[3].has_arguments);
    assert_eq!(mapping.plurals.len(), 1);
    assert_eq!(mapping.plurals[0].key, "Days");
}

#[test]
fn test_bundle_languages() {
    let dir = tempdir().unwrap();
    write_bundle(dir.path());
    let bundle = StringsBundle::new(dir.path());
    assert_eq!(bundle.languages().unwrap(), vec!["de", "en", "ru"]);
}

#[test]
fn test_fallback_through_secondary_and_base() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path(), LanguageSelection::new("de").with_secondary("ru"));
    let strings = store.current();

    assert_eq!(strings.primary_component().localized_name, "Deutsch");
    assert_eq!(strings.base_language_code(), "ru");
    assert_eq!(strings.resolve("Common.Cancel"), "Abbrechen");
    assert_eq!(strings.resolve("Common.Done"), "Done");
    assert_eq!(strings.resolve("Not.Mapped"), "Not.Mapped");

    let cancel = strings.resolved().scalar_id("Common.Cancel").unwrap();
    assert_eq!(strings.get(cancel), Some("Abbrechen"));
}

#[test]
fn test_format_scenarios() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path(), LanguageSelection::new("en"));
    let strings = store.current();

    let greeting = strings.format_key("Chat.Greeting", &["World"]);
    assert_eq!(greeting.string, "Hello, World!");
    assert_eq!(greeting.ranges, vec![ArgumentRange::new(0, 7, 5)]);

    let pair = strings.format_key("Chat.Pair", &["A", "B"]);
    assert_eq!(pair.string, "B and A");
    assert_eq!(
        pair.ranges,
        vec![ArgumentRange::new(1, 0, 1), ArgumentRange::new(0, 6, 1)]
    );

    let twice = strings.format_key("Chat.Twice", &["Ann"]);
    assert_eq!(twice.string, "Ann meets Ann");
    assert_eq!(twice.ranges_for(0).count(), 2);
}

#[test]
fn test_plural_per_language() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path(), LanguageSelection::new("en-US"));

    // en-US has no resource of its own, so English comes from the base
    let strings = store.current();
    assert_eq!(strings.lc(), LocaleCode::from_language_code("en_US"));
    assert_eq!(strings.plural_key("Days", 1), "1 day");
    assert_eq!(strings.plural_key("Days", 2), "2 days");

    let russian = store.switch_language(LanguageSelection::new("ru")).unwrap();
    assert_eq!(russian.plural_key("Days", 1), "1 день");
    assert_eq!(russian.plural_key("Days", 3), "3 дня");
    assert_eq!(russian.plural_key("Days", 5), "5 дней");
    assert_eq!(russian.plural_key("Days", 21), "21 день");

    // The old snapshot is unaffected by the switch
    assert_eq!(strings.plural_key("Days", 5), "5 days");
}

#[test]
fn test_missing_resources_resolve_to_keys() {
    let dir = tempdir().unwrap();
    let mut mapping = KeyMapping::new();
    mapping.push_scalar(0, "Common.Cancel", false);
    mapping.push_plural(0, "Days");

    let store = StringsStore::open(
        Arc::new(KeyMappingCache::preloaded(mapping)),
        StringsBundle::new(dir.path()),
        "en",
        LanguageSelection::new("fr").with_secondary("it"),
    )
    .unwrap();
    let strings = store.current();

    assert_eq!(strings.get(0), Some("Common.Cancel"));
    assert_eq!(strings.plural(0, 1).as_deref(), Some("Days"));
}

#[test]
fn test_config_opens_store() {
    let dir = tempdir().unwrap();
    let mapping_path = write_bundle(dir.path());
    let config_path = dir.path().join("config.toml");

    LocalizationConfig {
        bundle_dir: Some(dir.path().to_path_buf()),
        mapping_path: Some(mapping_path),
        language: "ru".to_string(),
        secondary_language: Some("de".to_string()),
        ..LocalizationConfig::default()
    }
    .save(&config_path)
    .unwrap();

    let config = LocalizationConfig::load(&config_path).unwrap();
    let store = config.open_store().unwrap();
    let strings = store.current();
    assert_eq!(strings.resolve("Common.Cancel"), "Отмена");
    assert_eq!(strings.secondary_component().unwrap().language_code, "de");
}

#[test]
fn test_coverage_and_export() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path(), LanguageSelection::new("ru"));
    let strings = store.current();

    let report = CoverageReport::from_strings(&strings);
    assert_eq!(report.primary, 2);
    assert_eq!(report.fallback, 4);
    assert!(report.missing_keys.is_empty());

    let export_path = dir.path().join("ru.csv");
    let count = export_for_translation(&strings, &export_path, ExportFormat::Csv).unwrap();
    assert_eq!(count, 6);

    let text = std::fs::read_to_string(&export_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Id,Key,Tier,Value,Translation"));
    assert!(text.contains("3,Common.Cancel,primary,Отмена,"));
}

#[test]
fn test_mapping_cache_loads_once() {
    let dir = tempdir().unwrap();
    let mapping_path = write_bundle(dir.path());
    let cache = KeyMappingCache::from_path(&mapping_path);

    let first = cache.get().unwrap();
    std::fs::remove_file(&mapping_path).unwrap();
    let second = cache.get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    cache.reset();
    assert!(matches!(cache.get(), Err(Error::MappingNotFound { .. })));
}
