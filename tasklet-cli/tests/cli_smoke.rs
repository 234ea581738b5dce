use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// `tasklet` pointed at a throwaway config and data directory
fn tasklet(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tasklet").expect("binary");
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(home.path().join("config.toml"))
        .arg("--data-dir")
        .arg(home.path().join("data"));
    cmd
}

#[test]
fn help_works() {
    Command::cargo_bin("tasklet")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("personal task list"));
}

#[test]
fn add_then_list_by_priority() {
    let home = TempDir::new().unwrap();

    tasklet(&home)
        .args(["add", "Buy", "milk", "-p", "low"])
        .assert()
        .success()
        .stdout(contains("Task added: [1] Buy milk"));
    tasklet(&home)
        .args(["add", "File", "taxes", "-p", "high"])
        .assert()
        .success();

    let output = tasklet(&home)
        .args(["list", "--sort", "priority", "--compact", "--no-color"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    let taxes = stdout.find("[2] File taxes").unwrap();
    let milk = stdout.find("[1] Buy milk").unwrap();
    assert!(taxes < milk);
    assert!(stdout.contains("[2 total | 0 done | 2 left | 0% | streak 0]"));
}

#[test]
fn duplicate_and_empty_tasks_fail() {
    let home = TempDir::new().unwrap();

    tasklet(&home).args(["add", "Call", "mom"]).assert().success();
    tasklet(&home)
        .args(["add", "call", "MOM"])
        .assert()
        .failure()
        .stderr(contains("Duplicate"));
    tasklet(&home)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(contains("Validation"));
}

#[test]
fn check_completes_and_starts_streak() {
    let home = TempDir::new().unwrap();

    tasklet(&home).args(["add", "Stretch"]).assert().success();
    tasklet(&home)
        .args(["check", "1"])
        .assert()
        .success()
        .stdout(contains("as done"));
    tasklet(&home)
        .args(["stats", "--no-color"])
        .assert()
        .success()
        .stdout(contains("streak 1"));
}

#[test]
fn filter_preference_is_remembered() {
    let home = TempDir::new().unwrap();

    tasklet(&home).args(["add", "Open", "task"]).assert().success();
    tasklet(&home).args(["add", "Closed", "task"]).assert().success();
    tasklet(&home).args(["check", "2"]).assert().success();

    tasklet(&home)
        .args(["list", "--filter", "active", "--no-color"])
        .assert()
        .success()
        .stdout(contains("Open task").and(contains("Closed task").not()));

    // no --filter this time
    tasklet(&home)
        .args(["list", "--no-color"])
        .assert()
        .success()
        .stdout(contains("Closed task").not());
}

#[test]
fn delete_and_clear_with_force() {
    let home = TempDir::new().unwrap();

    for text in ["One", "Two", "Three"] {
        tasklet(&home).args(["add", text]).assert().success();
    }
    tasklet(&home)
        .args(["delete", "1", "3", "99", "--force"])
        .assert()
        .success()
        .stdout(contains("Removed 2 task(s)."));

    tasklet(&home)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(contains("No completed tasks to clear."));
}

#[test]
fn remove_asks_for_confirmation() {
    let home = TempDir::new().unwrap();

    tasklet(&home).args(["add", "Keep", "me"]).assert().success();
    tasklet(&home)
        .args(["remove", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Cancelled."));
    tasklet(&home)
        .args(["remove", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Removed: Keep me"));
    tasklet(&home)
        .args(["remove", "1", "-f"])
        .assert()
        .failure()
        .stderr(contains("TaskNotFound"));
}

#[test]
fn corrupt_tasks_file_is_reported() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("tasks"), "{ definitely not tasks").unwrap();

    tasklet(&home)
        .args(["list"])
        .assert()
        .failure()
        .stderr(contains("CorruptState"));

    // the broken file is left alone
    let raw = std::fs::read_to_string(data.join("tasks")).unwrap();
    assert_eq!(raw, "{ definitely not tasks");
}

#[test]
fn shell_session() {
    let home = TempDir::new().unwrap();

    tasklet(&home)
        .args(["shell", "--no-color"])
        .write_stdin("add Plan trip #travel\nselect 1\nselect-all\nstats\nquit\n")
        .assert()
        .success()
        .stdout(contains("Task added: [1] Plan trip #travel"))
        .stdout(contains("1 selected"))
        .stdout(contains("0 selected"));

    tasklet(&home)
        .args(["list", "--search", "TRAVEL", "--compact", "--no-color"])
        .assert()
        .success()
        .stdout(contains("[1] Plan trip #travel"));
}
