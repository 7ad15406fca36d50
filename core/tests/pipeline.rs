use dirmd_core::{Bundler, Config, IgnoreRules, assemble, collect_files, dispatch};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

fn write_file(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "go.mod", b"module example.com/demo\n");
    write_file(root, "main.go", b"package main\n\nfunc main() {}\n");
    write_file(root, "api/v1/handler.go", b"package v1\n");
    write_file(root, "api/v1/model.go", b"package v1\n\ntype Model struct{}\n");
    write_file(root, "api/v2/handler.go", b"package v2\n");
    write_file(root, "docs/README.md", "# Démo\n\nこんにちは\n".as_bytes());
    write_file(root, "assets/logo.png", &[0x89, b'P', b'N', b'G', 0x00, 0x1A]);
    write_file(root, "scripts/run.sh", b"#!/bin/sh\necho hi\n");
    write_file(root, "Makefile", b"all:\n\tgo build\n");
    dir
}

fn config_for(root: &Path, output: PathBuf, workers: usize) -> Config {
    Config {
        root_dir: root.canonicalize().unwrap(),
        output_path: output,
        workers,
        ..Config::default()
    }
}

fn render_with_workers(root: &Path, workers: usize) -> String {
    let out = root.join("unused.md");
    Bundler::new(config_for(root, out, workers))
        .unwrap()
        .render()
        .unwrap()
        .document
}

#[test]
fn output_is_identical_across_worker_counts() {
    let dir = sample_project();
    let single = render_with_workers(dir.path(), 1);
    for workers in [2, 4, 16] {
        assert_eq!(render_with_workers(dir.path(), workers), single);
    }
}

#[test]
fn file_blocks_follow_sorted_relative_paths() {
    let dir = sample_project();
    let document = render_with_workers(dir.path(), 3);

    let lines: Vec<&str> = document.lines().collect();
    let block_paths: Vec<&str> = lines
        .windows(2)
        .filter(|pair| {
            pair[0].starts_with('`') && !pair[0].starts_with("```") && pair[1].starts_with("```")
        })
        .map(|pair| pair[0].trim_matches('`'))
        .collect();
    assert_eq!(
        block_paths,
        vec![
            "Makefile",
            "api/v1/handler.go",
            "api/v1/model.go",
            "api/v2/handler.go",
            "docs/README.md",
            "go.mod",
            "main.go",
            "scripts/run.sh",
        ]
    );
    assert!(document.contains("`Makefile`\n```makefile\nall:\n\tgo build\n```"));
    assert!(document.contains("`docs/README.md`\n```markdown\n# Démo\n\nこんにちは\n```"));
    assert!(!document.contains("`assets/logo.png`\n```"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = sample_project();
    let root = dir.path().canonicalize().unwrap();
    let output = root.join("bundle.md");
    let bundler = Bundler::new(config_for(&root, output.clone(), 4)).unwrap();

    bundler.bundle().unwrap();
    let first = fs::read(&output).unwrap();
    bundler.bundle().unwrap();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn root_gitignore_and_custom_file_both_apply() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, ".gitignore", b"*.log\n/node_modules/\nbuild/\nsecret.txt\n");
    write_file(root, "app.log", b"log");
    write_file(root, "node_modules/react/index.js", b"js");
    write_file(root, "build/output.bin", b"bin");
    write_file(root, "secret.txt", b"s");
    write_file(root, "data.tmp", b"tmp");
    write_file(root, "dist/bundle.js", b"js");
    write_file(root, "src/main.go", b"package main");

    let extra = tempdir().unwrap();
    let custom = extra.path().join("custom.ignore");
    fs::write(&custom, "# extra\n*.tmp\n/dist/\n").unwrap();

    let rules = IgnoreRules::load(root, Some(&custom)).unwrap();
    let files = collect_files(root, &rules, false).unwrap();
    let relative: Vec<String> = files
        .iter()
        .map(|f| dirmd_core::relative_slash_path(root, f))
        .collect();
    assert_eq!(relative, vec![".gitignore", "src/main.go"]);
}

#[test]
fn pipeline_stages_compose() {
    let dir = sample_project();
    let root = dir.path().canonicalize().unwrap();
    let paths = collect_files(&root, &IgnoreRules::empty(), false).unwrap();
    let results = dispatch(&paths, 2).unwrap();
    assert_eq!(results.len(), paths.len());

    let assembled = assemble(&root, &paths, &results).unwrap();
    assert_eq!(assembled.bundled, paths.len() - 1);
    assert_eq!(assembled.skipped.binary, vec!["assets/logo.png"]);
}

#[test]
fn empty_directory_renders_tree_heading_only() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let name = root.file_name().unwrap().to_string_lossy().into_owned();
    let document = render_with_workers(&root, 2);
    assert_eq!(document, format!("# Structure of `{name}`\n\n- `{name}/`\n"));
}
