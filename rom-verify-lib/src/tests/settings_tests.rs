use super::*;

#[test]
fn test_defaults_match_nes_headered_collection() {
    let config = VerifyConfig::default();
    assert_eq!(config.dat_file, PathBuf::from("nes.dat"));
    assert_eq!(config.missing_file, PathBuf::from("MISSING"));
    assert_eq!(config.header_len, 16);
    assert_eq!(config.regions, vec!["(USA)"]);
    assert!(config.roots.is_empty());
    assert_eq!(
        config.excluded_dirs,
        vec!["[ROM Hacks]", "[Translations]", "[Nintendo Vs. System]"]
    );
    assert_eq!(config.extensions, vec!["zip"]);
    assert_eq!(config.archive_policy, ArchivePolicy::FirstEntryOnly);
    assert_eq!(config.jobs, 1);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = parse_config(
        r#"
regions = ["(Japan)"]
archive_policy = "reject-multi-entry"
jobs = 4
"#,
    )
    .unwrap();
    assert_eq!(config.regions, vec!["(Japan)"]);
    assert_eq!(config.archive_policy, ArchivePolicy::RejectMultiEntry);
    assert_eq!(config.jobs, 4);
    assert_eq!(config.header_len, 16);
    assert_eq!(config.excluded_dirs.len(), 3);
}

#[test]
fn test_full_config() {
    let config = parse_config(
        r#"
roots = ["/roms/nes", "/roms/nes-extra"]
dat_file = "dat/snes.dat"
missing_file = "out/missing.txt"
excluded_dirs = ["[BIOS]"]
regions = ["Japan", "USA"]
header_len = 0
extensions = ["zip", "ZIP"]
"#,
    )
    .unwrap();
    assert_eq!(
        config.roots,
        vec![PathBuf::from("/roms/nes"), PathBuf::from("/roms/nes-extra")]
    );
    assert_eq!(config.regions, vec!["Japan", "USA"]);
    assert_eq!(config.dat_file, PathBuf::from("dat/snes.dat"));
    assert_eq!(config.missing_file, PathBuf::from("out/missing.txt"));
    assert_eq!(config.excluded_dirs, vec!["[BIOS]"]);
    assert_eq!(config.header_len, 0);
}

#[test]
fn test_unknown_key_is_rejected() {
    assert!(parse_config("regoins = [\"(USA)\"]").is_err());
    assert!(parse_config("region = \"(USA)\"").is_err());
}

#[test]
fn test_load_explicit_missing_file_fails() {
    let result = load_config(Some(Path::new("/nonexistent/rom-verify/config.toml")));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_load_explicit_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "regions = [\"(World)\"]\n").unwrap();
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.regions, vec!["(World)"]);
}

#[test]
fn test_load_invalid_file_reports_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "jobs = \"many\"\n").unwrap();
    match load_config(Some(&path)) {
        Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_effective_jobs() {
    let mut config = VerifyConfig::default();
    assert_eq!(config.effective_jobs(), 1);
    config.jobs = 3;
    assert_eq!(config.effective_jobs(), 3);
    config.jobs = 0;
    assert!(config.effective_jobs() >= 1);
}

#[test]
fn test_validate_requires_roots_and_regions() {
    let mut config = VerifyConfig::default();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    config.roots = vec![PathBuf::from("NES")];
    assert!(config.validate().is_ok());

    config.regions.clear();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
