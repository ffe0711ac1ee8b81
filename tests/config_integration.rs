use postview::config::{load_config_flags, parse_flag_tokens, ConfigFlags};
use postview::page::{PageKind, SyncMode};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".postviewrc");
    let content = r#"
# comment
--minimal

--mode request
   
--debounce-ms=400
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.minimal);
    assert_eq!(flags.mode, Some(SyncMode::Request));
    assert_eq!(flags.debounce_ms, Some(400));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".postviewrc");
    let content = "--minimal\n--mode request\n--timeout-ms 2500\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "postview".to_string(),
        "--mode".to_string(),
        "url".to_string(),
        "--page".to_string(),
        "style".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.minimal, "file flags should remain enabled");
    assert_eq!(effective.page, Some(PageKind::Style), "cli flags should be applied");
    assert_eq!(effective.mode, Some(SyncMode::Url), "cli should override mode");
    assert_eq!(
        effective.timeout_ms,
        Some(2500),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_unknown_values_are_ignored() {
    let args = vec![
        "postview".to_string(),
        "--mode=websocket".to_string(),
        "--page".to_string(),
        "about".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        minimal: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        verbose: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.minimal);
    assert!(merged.verbose);
}
