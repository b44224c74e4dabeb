use criterion::{Criterion, criterion_group, criterion_main};
use relkit::batch::{self, MutationMode};
use relkit::config;
use relkit::pattern;
use relkit::templates::{self, Variables};
use relkit::version::{self, Version};
use std::hint::black_box;

const MOCK_CONFIG: &str = r#"
[templates]
root = "templates"

[variables]
AUTHOR = "Jane Doe"
PROJECT_NAME = "Widget"

[version]
pattern = 'AssemblyVersion\("([^"]+)"\)'
files = ["src/AssemblyInfo.cs", "src/Other/AssemblyInfo.cs"]
backup = true

[stamp]
pattern = 'BUILD_TIME: i64 = (\d+)'
files = ["src/build_info.rs"]

[release]
assets = ["dist/app.zip", "dist/app.tar.gz"]
draft = true
"#;

const ASSEMBLY_INFO: &str = r#"using System.Reflection;
[assembly: AssemblyTitle("Widget")]
[assembly: AssemblyVersion("1.4.2.9")]
[assembly: AssemblyFileVersion("1.4.2.9")]
"#;

const LICENSE: &str = "MIT License\n\nCopyright (c) {{YEAR}} {{AUTHOR}}\n\n\
Permission is hereby granted, free of charge, to any person obtaining a copy \
of {{PROJECT_NAME}} ({{REPO_URL}}) and {{UNKNOWN}} associated files.\n";

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_relkit_toml", |b| {
        b.iter(|| config::parse_config(black_box(MOCK_CONFIG)).unwrap())
    });
}

fn bench_version(c: &mut Criterion) {
    c.bench_function("version_parse_bump", |b| {
        b.iter(|| Version::parse(black_box("1.4.2.9")).unwrap().bumped())
    });

    let regex = pattern::compile(r#"AssemblyVersion\("([^"]+)"\)"#).unwrap();
    c.bench_function("bump_assembly_info", |b| {
        b.iter(|| version::bump_version(black_box(ASSEMBLY_INFO), &regex).unwrap())
    });

    let prefixed = pattern::compile(r#"(AssemblyFileVersion\(")[^"]*"#).unwrap();
    c.bench_function("mutate_content_set", |b| {
        let mode = MutationMode::Set("2.0.0.0".to_string());
        b.iter(|| batch::mutate_content(black_box(ASSEMBLY_INFO), &prefixed, &mode).unwrap())
    });
}

fn bench_render(c: &mut Criterion) {
    let mut overrides = Variables::new();
    overrides.insert("AUTHOR".into(), "Jane Doe".into());
    overrides.insert("YEAR".into(), "2024".into());

    c.bench_function("render_license", |b| {
        b.iter(|| templates::render(black_box(LICENSE), black_box(&overrides)))
    });

    let vars = templates::default_variables();
    c.bench_function("render_with_defaults", |b| {
        b.iter(|| templates::render_with(black_box(LICENSE), &vars))
    });
}

criterion_group!(benches, bench_config_parse, bench_version, bench_render);
criterion_main!(benches);
