//! CLI tests for the `rit` binary.
//!
//! Spawns the binary against a temporary `RIT_HOME` and `HOME` and checks exit
//! codes and what is left on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

struct Sandbox {
    _temp: tempfile::TempDir,
    rit_home: PathBuf,
    home: PathBuf,
    workspace: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let rit_home = temp.path().join("rit-home");
        let home = temp.path().join("home");
        let workspace = temp.path().join("team-formulas");
        fs::create_dir_all(&rit_home).expect("rit home");
        fs::create_dir_all(&home).expect("home");
        fs::create_dir_all(&workspace).expect("workspace");

        let registry = serde_json::json!({ "Team": workspace });
        fs::write(
            rit_home.join("formula_workspaces.json"),
            serde_json::to_string_pretty(&registry).expect("json"),
        )
        .expect("registry");

        Self {
            _temp: temp,
            rit_home,
            home,
            workspace,
        }
    }

    fn mirror(&self) -> PathBuf {
        self.rit_home.join("repos").join("local-team")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_rit"));
        cmd.args(args)
            .env("RIT_HOME", &self.rit_home)
            .env("HOME", &self.home)
            .env_remove("RUST_LOG")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run rit")
    }

    fn run_with_stdin(&self, args: &[&str], payload: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn rit");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(payload.as_bytes())
            .expect("write payload");
        child.wait_with_output().expect("wait rit")
    }
}

fn formula_at(root: &Path, segments: &[&str]) {
    let dir = segments.iter().fold(root.to_path_buf(), |p, s| p.join(s));
    fs::create_dir_all(dir.join("src")).expect("src");
    fs::write(dir.join("src/main.sh"), "echo hi\n").expect("main.sh");
}

#[test]
fn delete_with_flags_removes_formula_and_empty_groups() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["test", "unit"]);
    formula_at(&sandbox.workspace, &["keep"]);

    let output = sandbox.run(&[
        "delete",
        "formula",
        "--workspace",
        "team",
        "--formula",
        "rit test unit",
    ]);

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(!sandbox.workspace.join("test").exists());
    assert!(sandbox.workspace.join("keep/src/main.sh").exists());
}

#[test]
fn delete_alias_from_stdin_updates_mirror_tree() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["demo", "hello"]);
    formula_at(&sandbox.mirror(), &["demo", "hello"]);
    formula_at(&sandbox.mirror(), &["demo", "world"]);

    let payload = serde_json::json!({
        "workspace_path": sandbox.workspace,
        "formula": "rit demo hello",
    })
    .to_string();
    let output = sandbox.run_with_stdin(&["del", "formula", "--stdin"], &payload);

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(!sandbox.workspace.join("demo").exists());
    assert!(!sandbox.mirror().join("demo/hello").exists());

    let tree = fs::read_to_string(sandbox.mirror().join("tree.json")).expect("tree.json");
    assert!(tree.contains("root_demo_world"));
    assert!(!tree.contains("root_demo_hello"));
    assert!(!sandbox.workspace.join("tree.json").exists());
}

#[test]
fn delete_missing_flag_fails() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["test"]);

    let output = sandbox.run(&["delete", "formula", "--workspace", "Team"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("formula"));
    assert!(sandbox.workspace.join("test/src").exists());
}

#[test]
fn delete_unknown_formula_fails_without_changes() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["test"]);

    let output = sandbox.run(&[
        "delete",
        "formula",
        "--workspace",
        "Team",
        "--formula",
        "rit ghost",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("rit ghost"));
    assert!(sandbox.workspace.join("test/src").exists());
}

#[test]
fn rename_with_legacy_flag_names_moves_formula() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["demo", "hello"]);

    let output = sandbox.run(&[
        "rename",
        "formula",
        "--workspace",
        "Team",
        "--old-name-formula",
        "rit demo hello",
        "--new-name-formula",
        "rit greet hello",
    ]);

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(sandbox.workspace.join("greet/hello/src/main.sh").exists());
    assert!(!sandbox.workspace.join("demo").exists());
}

#[test]
fn rename_onto_existing_formula_fails() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["demo", "hello"]);
    formula_at(&sandbox.workspace, &["demo", "world"]);

    let output = sandbox.run(&[
        "rename",
        "formula",
        "--workspace",
        "Team",
        "--old-formula",
        "rit demo hello",
        "--new-formula",
        "rit demo world",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(sandbox.workspace.join("demo/hello/src").exists());
}

#[test]
fn tree_write_creates_index() {
    let sandbox = Sandbox::new();
    formula_at(&sandbox.workspace, &["demo", "hello"]);

    let output = sandbox.run(&["tree", "--workspace", "team", "--write"]);

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hello"));
    let tree = fs::read_to_string(sandbox.workspace.join("tree.json")).expect("tree.json");
    assert!(tree.contains("\"root_demo_hello\""));
}

#[test]
fn unknown_command_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["explode", "formula"]);
    assert_eq!(output.status.code(), Some(1));
}
