//! Environment provisioner and version control driver command lines

use std::fs;
use std::path::Path;

use husk::adapters::process::SystemRunner;
use husk::core::ports::CommandRunner;
use husk::core::services::environment::EnvironmentProvisioner;
use husk::core::services::vcs::GitDriver;
use husk::error::PipelineError;
use tempfile::TempDir;

use crate::common::FakeRunner;

#[test]
fn environment_commands() {
    let runner = FakeRunner::new();
    let env = EnvironmentProvisioner::new(&runner);
    let folder = Path::new("/p");

    let created = env.create(folder, "3.12").unwrap();
    assert_eq!(created.message, "Python 3.12 virtual environment created.");
    env.install_dev(folder, "flake8").unwrap();
    let interpreter = env.interpreter_path(folder).unwrap();

    assert_eq!(interpreter, "/home/octo/.venvs/my-project/bin/python");
    assert_eq!(
        runner.calls(),
        ["pipenv --python 3.12", "pipenv install flake8 --dev", "pipenv --py"]
    );
}

#[test]
fn environment_failure_is_process_error() {
    let runner = FakeRunner::failing_on("pipenv install");
    let env = EnvironmentProvisioner::new(&runner);
    let err = env.install_dev(Path::new("/p"), "flake8").unwrap_err();
    assert!(matches!(err, PipelineError::Process(_)));
    assert!(err.detail().unwrap().contains("simulated failure"));
}

#[test]
fn git_commands_in_order() {
    let runner = FakeRunner::new().with_output("git init", "Initialized empty Git repository\n");
    let git = GitDriver::new(&runner);
    let folder = Path::new("/p");

    let (init, branch) = git.init(folder, "main").unwrap();
    assert_eq!(init.message, "Initialized empty Git repository");
    assert_eq!(branch, "main");
    git.stage_all(folder).unwrap();
    git.commit(folder).unwrap();
    git.add_origin(folder, "https://github.com/octo/my-project").unwrap();
    git.push(folder, "main").unwrap();

    let calls = runner.calls();
    assert_eq!(calls[0], "git init");
    assert_eq!(calls[1], "git rev-parse --verify -q HEAD");
    assert_eq!(calls[2], "git symbolic-ref HEAD refs/heads/main");
    assert_eq!(calls[3], "git add -A");
    assert_eq!(
        calls[4],
        format!("git commit -m initial commit -m by `husk/{}`", husk::VERSION)
    );
    assert_eq!(calls[5], "git remote add origin https://github.com/octo/my-project.git");
    assert_eq!(calls[6], "git push -u origin main");
}

#[test]
fn git_init_keeps_the_branch_of_an_existing_history() {
    let runner = FakeRunner::new().with_history("develop");
    let git = GitDriver::new(&runner);

    let (init, branch) = git.init(Path::new("/p"), "master").unwrap();

    assert_eq!(branch, "develop");
    assert_eq!(init.detail.as_deref(), Some("kept branch `develop`"));
    assert_eq!(
        runner.calls(),
        ["git init", "git rev-parse --verify -q HEAD", "git symbolic-ref --short HEAD"]
    );
}

#[test]
fn git_failure_stops_at_the_failing_command() {
    let runner = FakeRunner::failing_on("git init");
    let git = GitDriver::new(&runner);
    assert!(git.init(Path::new("/p"), "master").is_err());
    assert_eq!(runner.calls(), ["git init"]);
}

#[test]
fn git_init_on_real_repository_builds_on_existing_history() {
    if SystemRunner.run(&["git", "--version"], Path::new(".")).is_err() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let folder = dir.path();
    let git = |args: &[&str]| {
        let mut command = vec!["git"];
        command.extend_from_slice(args);
        SystemRunner.run(&command, folder).unwrap()
    };
    git(&["init"]);
    git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&["config", "user.name", "Octo"]);
    git(&["config", "user.email", "octo@example.com"]);
    git(&["config", "commit.gpgsign", "false"]);
    fs::write(folder.join("notes.txt"), "draft\n").unwrap();
    git(&["add", "-A"]);
    git(&["commit", "-m", "user work"]);

    let driver = GitDriver::new(&SystemRunner);
    let (_, branch) = driver.init(folder, "master").unwrap();
    fs::write(folder.join("readme.md"), "# My Project\n").unwrap();
    driver.stage_all(folder).unwrap();
    driver.commit(folder).unwrap();

    assert_eq!(branch, "main");
    assert_eq!(git(&["symbolic-ref", "--short", "HEAD"]).trim(), "main");
    let log = git(&["log", "--format=%s"]);
    assert_eq!(log.lines().collect::<Vec<_>>(), ["initial commit", "user work"]);
}
