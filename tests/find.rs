use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use cfinder::{CFinder, CFinderError, FindOptions, Result, ToolConfig, ToolRunner};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/triangle.txt_files")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// Stands in for the CFinder binary: records its arguments and writes the
/// triangle fixture to the `-o` directory.
#[derive(Default)]
struct FixtureRunner {
    calls: RefCell<Vec<Vec<String>>>,
}

impl ToolRunner for FixtureRunner {
    fn run(&self, _executable: &Path, args: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(args.to_vec());
        let output = args
            .iter()
            .position(|a| a == "-o")
            .and_then(|i| args.get(i + 1))
            .unwrap();
        copy_dir(&fixture(), Path::new(output));
        Ok(())
    }
}

struct FailingRunner;

impl ToolRunner for FailingRunner {
    fn run(&self, _executable: &Path, args: &[String]) -> Result<()> {
        Err(CFinderError::ExternalTool {
            code: Some(1),
            args: args.to_vec(),
        })
    }
}

fn config(dir: &Path) -> ToolConfig {
    ToolConfig::new(dir.join("CFinder_commandline"), None)
}

#[test]
fn find_runs_tool_then_loads_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("triangle.txt_files");
    let cf = CFinder::with_runner(config(dir.path()), FixtureRunner::default());
    let opts = FindOptions {
        output: Some(output.clone()),
        ..FindOptions::default()
    };

    let results = cf.find(Path::new("triangle.txt"), &opts, false).unwrap();

    assert_eq!(results.cliques.rows.len(), 2);
    assert_eq!(results.k(3).unwrap().communities.rows.len(), 2);
    assert!(output.join("k=3").is_dir());

    let calls = cf_calls(&cf);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].last().map(String::as_str), Some("-U"));
}

fn cf_calls(cf: &CFinder<FixtureRunner>) -> Vec<Vec<String>> {
    cf.runner().calls.borrow().clone()
}

#[test]
fn default_output_lives_next_to_tool() {
    let dir = tempfile::tempdir().unwrap();
    let cf = CFinder::with_runner(config(dir.path()), FixtureRunner::default());

    let results = cf
        .find(Path::new("triangle.txt"), &FindOptions::default(), false)
        .unwrap();

    assert_eq!(results.by_k.len(), 1);
    assert!(dir.path().join("output").join("cliques").is_file());
}

#[test]
fn delete_output_removes_tree_after_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");
    let cf = CFinder::with_runner(config(dir.path()), FixtureRunner::default());
    let opts = FindOptions {
        output: Some(output.clone()),
        ..FindOptions::default()
    };

    let results = cf.find(Path::new("triangle.txt"), &opts, true).unwrap();

    assert_eq!(results.k(3).unwrap().size_distribution.pairs(), vec![(3, 2)]);
    assert!(!output.exists());
}

#[test]
fn invalid_options_never_reach_the_tool() {
    let dir = tempfile::tempdir().unwrap();
    let cf = CFinder::with_runner(config(dir.path()), FixtureRunner::default());
    let opts = FindOptions {
        intensity: true,
        ..FindOptions::default()
    };

    let err = cf.find(Path::new("triangle.txt"), &opts, false).unwrap_err();

    assert!(matches!(err, CFinderError::Configuration(_)));
    assert!(cf_calls(&cf).is_empty());
}

#[test]
fn tool_failure_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let cf = CFinder::with_runner(config(dir.path()), FailingRunner);
    let err = cf
        .find(Path::new("triangle.txt"), &FindOptions::default(), false)
        .unwrap_err();
    assert!(matches!(err, CFinderError::ExternalTool { code: Some(1), .. }));
}

#[test]
fn broken_per_k_file_aborts_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");
    copy_dir(&fixture(), &output);
    fs::write(
        output.join("k=3").join("communities"),
        "1\n2\n3\n4\n5\n6\n0 a b c\n",
    )
    .unwrap();

    let cf = CFinder::new(config(dir.path()));
    let err = cf.load(&output, false).unwrap_err();
    match err {
        CFinderError::Format { path, .. } => assert!(path.ends_with("k=3/communities")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_distribution_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");
    copy_dir(&fixture(), &output);
    fs::remove_file(output.join("k=3").join("overlap_distribution")).unwrap();

    let err = cfinder::load(&output, false).unwrap_err();
    assert!(matches!(err, CFinderError::NotFound { .. }));
}
