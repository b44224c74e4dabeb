//! Library-level tests for batch mutation and template creation.
//!
//! These run the public API against real files in temporary directories.

use relkit::batch::{self, BatchOptions, MutationMode};
use relkit::pattern;
use relkit::stamp::StampSource;
use relkit::templates::{self, TemplateCategory, TemplateDescriptor, TemplateStore, Variables};
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

const ASSEMBLY_PATTERN: &str = r#"AssemblyVersion\("([^"]+)"\)"#;

#[test]
fn test_bump_rolls_build_digit_into_patch() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("AssemblyInfo.cs");
    fs::write(
        &file,
        "using System.Reflection;\n[assembly: AssemblyVersion(\"1.0.0.9\")]\n",
    )
    .unwrap();

    let regex = pattern::compile(ASSEMBLY_PATTERN).unwrap();
    let results = batch::apply(&[&file], &regex, &MutationMode::Bump, BatchOptions::default());

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].old_value.as_deref(), Some("1.0.0.9"));
    assert_eq!(results[0].new_value.as_deref(), Some("1.0.1.0"));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "using System.Reflection;\n[assembly: AssemblyVersion(\"1.0.1.0\")]\n"
    );
}

#[test]
fn test_unmatched_file_does_not_stop_batch() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.cs");
    let second = dir.path().join("second.cs");
    let third = dir.path().join("third.cs");
    fs::write(&first, "[assembly: AssemblyVersion(\"2.1.0.3\")]").unwrap();
    fs::write(&second, "// no version here").unwrap();
    fs::write(&third, "[assembly: AssemblyVersion(\"0.9.9.9\")]").unwrap();

    let regex = pattern::compile(ASSEMBLY_PATTERN).unwrap();
    let results = batch::apply(
        &[&first, &second, &third],
        &regex,
        &MutationMode::Bump,
        BatchOptions::default(),
    );

    assert_eq!(results.len(), 3);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert_eq!(results[1].error_kind(), Some("PatternNotMatched"));
    assert!(results[2].success);
    assert!(!batch::all_succeeded(&results));

    assert_eq!(fs::read_to_string(&second).unwrap(), "// no version here");
    assert_eq!(
        fs::read_to_string(&third).unwrap(),
        "[assembly: AssemblyVersion(\"0.9.10.0\")]"
    );
}

#[test]
fn test_missing_file_is_reported_not_found() {
    let dir = tempdir().unwrap();
    let regex = pattern::compile(ASSEMBLY_PATTERN).unwrap();
    let results = batch::apply(
        &[dir.path().join("absent.cs")],
        &regex,
        &MutationMode::Set("3.0.0.0".into()),
        BatchOptions::default(),
    );
    assert_eq!(results[0].error_kind(), Some("NotFound"));
}

#[test]
fn test_set_with_backup_keeps_original() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("package.props");
    fs::write(&file, "<Version>1.2.3</Version>").unwrap();

    let regex = pattern::compile(r"(<Version>)[^<]*").unwrap();
    let options = BatchOptions {
        backup: true,
        dry_run: false,
    };
    let results = batch::apply(&[&file], &regex, &MutationMode::Set("2.0.0".into()), options);

    assert!(results[0].changed);
    assert_eq!(results[0].old_value.as_deref(), Some("1.2.3"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "<Version>2.0.0</Version>");
    assert_eq!(
        fs::read_to_string(batch::backup_path(&file)).unwrap(),
        "<Version>1.2.3</Version>"
    );
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("version.txt");
    fs::write(&file, "version=1.0.0.4").unwrap();

    let regex = pattern::compile(r"version=(\S+)").unwrap();
    let options = BatchOptions {
        backup: true,
        dry_run: true,
    };
    let results = batch::apply(&[&file], &regex, &MutationMode::Bump, options);

    assert_eq!(results[0].new_value.as_deref(), Some("1.0.0.5"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "version=1.0.0.4");
    assert!(!batch::backup_path(&file).exists());
}

#[test]
fn test_stamp_from_file_mtime() {
    let dir = tempdir().unwrap();
    let reference = dir.path().join("artifact.bin");
    fs::write(&reference, b"bin").unwrap();
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    fs::File::options()
        .write(true)
        .open(&reference)
        .unwrap()
        .set_modified(mtime)
        .unwrap();

    let target = dir.path().join("build_info.rs");
    fs::write(&target, "pub const BUILD_TIME: i64 = 0;\n").unwrap();

    let regex = pattern::compile(r"BUILD_TIME: i64 = (\d+)").unwrap();
    let mode = MutationMode::Stamp(StampSource::FileModified(reference));
    let results = batch::apply(&[&target], &regex, &mode, BatchOptions::default());

    assert!(results[0].success);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "pub const BUILD_TIME: i64 = 1700000000;\n"
    );
}

#[test]
fn test_license_template_scenario() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("License")).unwrap();
    fs::write(
        root.path().join("License").join("MIT.txt"),
        "MIT License\n\nCopyright (c) {{YEAR}} {{AUTHOR}}\n",
    )
    .unwrap();

    let store = TemplateStore::new(root.path());
    let mut overrides = Variables::new();
    overrides.insert("YEAR".into(), "2024".into());
    overrides.insert("AUTHOR".into(), "Jane Doe".into());

    let out = tempdir().unwrap();
    let descriptor = TemplateDescriptor::new(TemplateCategory::License, "MIT");
    let written =
        templates::create_from_template(&store, &descriptor, &overrides, out.path(), false)
            .unwrap();

    assert_eq!(written, Some(out.path().join("LICENSE")));
    assert_eq!(
        fs::read_to_string(out.path().join("LICENSE")).unwrap(),
        "MIT License\n\nCopyright (c) 2024 Jane Doe\n"
    );
}
