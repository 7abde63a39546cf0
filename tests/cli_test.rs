//! End-to-end tests for the converter binary.

#![cfg(unix)]

mod helpers;

use helpers::TestEnv;

#[test]
fn test_converts_directory_and_prints_summary() {
    let env = TestEnv::new();
    let msg = env.add_source("a.msg");
    let bxm = env.add_source("nested/b.BXM");
    env.add_source("readme.txt");

    let out = env.run();

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("=== GBFR Data Converter ==="));
    assert!(out.stdout.contains("Configuration loaded successfully"));
    assert!(out.stdout.contains("Found 2 file(s) to convert"));
    assert!(out.stdout.contains("Success: 2 file(s)"));
    assert!(out.stdout.contains("Failed: 0 file(s)"));
    assert!(out.stdout.contains("Total: 2 file(s)"));

    assert!(!msg.exists());
    assert!(!bxm.exists());
    assert!(env.data.join("a.json").exists());
    assert!(env.data.join("nested/b.BXM.xml").exists());
    assert!(env.data.join("readme.txt").exists());
}

#[test]
fn test_second_run_counts_existing_outputs_as_success() {
    let env = TestEnv::new();
    let msg = env.add_source("a.msg");
    std::fs::write(env.data.join("a.json"), "{}").expect("write");

    let out = env.run();

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("JSON file already exists"));
    assert!(out.stdout.contains("Success: 1 file(s)"));
    assert!(msg.exists());
}

#[test]
fn test_empty_directory_reports_nothing_to_do() {
    let env = TestEnv::new();

    let out = env.run();

    assert_eq!(out.code, Some(0));
    assert!(
        out.stdout
            .contains("No convertible files found (.msg or .bxm)")
    );
    assert!(!out.stdout.contains("=== Conversion Complete ==="));
}

#[test]
fn test_missing_settings_file_aborts() {
    let env = TestEnv::new();
    std::fs::remove_file(&env.config).expect("remove settings");
    env.add_source("a.msg");

    let out = env.run();

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Error loading configuration"));
    assert!(out.stdout.contains("exists and is properly formatted"));
    assert!(env.data.join("a.msg").exists());
}

#[test]
fn test_missing_tool_aborts_before_scanning() {
    let env = TestEnv::new().with_missing_tools();
    env.add_source("a.msg");

    let out = env.run();

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Cannot find MsgPack2Json"));
    assert!(!out.stdout.contains("Found"));
}

#[test]
fn test_nonexistent_directory_aborts() {
    let env = TestEnv::new();

    let out = env.run_on(&env.root.path().join("nowhere"));

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Directory does not exist!"));
}

#[test]
fn test_debug_log_reports_loaded_configuration() {
    let env = TestEnv::new();

    let out = env.run_with_log("debug");

    assert_eq!(out.code, Some(0));
    assert!(out.stderr.contains("Configuration loaded"));
}
