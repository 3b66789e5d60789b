//! Shared fakes and fixtures
//!
//! In-memory implementations of every port trait, plus a template tree and
//! project folder on disk.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use husk::config::Config;
use husk::core::models::{
    Authorization, HttpOutcome, HttpRequest, LicenseCatalog, ProjectSpec, StepResult, TemplateSet,
};
use husk::core::ports::{
    CommandRunner, CredentialProvider, HttpGateway, InputProvider, Reporter, SecretStore,
};
use husk::error::{NetworkError, PipelineError, ProcessError};
use tempfile::TempDir;

// =============================================================================
// Command runner
// =============================================================================

/// Records every command; fails any command starting with a failing prefix.
///
/// The project folder starts without commits, so `git rev-parse` fails
/// unless [`FakeRunner::with_history`] is used.
pub struct FakeRunner {
    calls: RefCell<Vec<String>>,
    failing: Vec<String>,
    outputs: Vec<(String, String)>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: RefCell::default(),
            failing: vec!["git rev-parse".to_string()],
            outputs: Vec::new(),
        }
        .with_output("pipenv --py", "/home/octo/.venvs/my-project/bin/python\n")
    }

    pub fn failing_on(prefix: &str) -> Self {
        let mut runner = Self::new();
        runner.failing.push(prefix.to_string());
        runner
    }

    /// The folder is already a repository with commits on `branch`
    pub fn with_history(mut self, branch: &str) -> Self {
        self.failing.retain(|prefix| prefix != "git rev-parse");
        self.with_output("git rev-parse", "0a1b2c3\n")
            .with_output("git symbolic-ref --short HEAD", &format!("{branch}\n"))
    }

    pub fn with_output(mut self, prefix: &str, output: &str) -> Self {
        self.outputs.push((prefix.to_string(), output.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &[&str], _workdir: &Path) -> Result<String, ProcessError> {
        let line = command.join(" ");
        self.calls.borrow_mut().push(line.clone());
        if self.failing.iter().any(|prefix| line.starts_with(prefix.as_str())) {
            return Err(ProcessError::Exit {
                command: line,
                code: Some(1),
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(self
            .outputs
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default())
    }
}

// =============================================================================
// HTTP gateway
// =============================================================================

/// Answers by URL suffix; anything unrouted gets `201 {}`
#[derive(Default)]
pub struct FakeGateway {
    requests: RefCell<Vec<HttpRequest>>,
    routes: Vec<(String, u16, String)>,
}

impl FakeGateway {
    /// Gateway that knows the repository creation answer
    pub fn new() -> Self {
        Self::default().route("/user/repos", 201, r#"{"full_name": "octo/my-project"}"#)
    }

    pub fn route(mut self, suffix: &str, status: u16, body: &str) -> Self {
        self.routes.insert(0, (suffix.to_string(), status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl HttpGateway for FakeGateway {
    fn send(&self, request: &HttpRequest) -> Result<HttpOutcome, NetworkError> {
        self.requests.borrow_mut().push(request.clone());
        let (status_code, body) = self
            .routes
            .iter()
            .find(|(suffix, _, _)| request.url.ends_with(suffix.as_str()))
            .map_or((201, "{}".to_string()), |(_, status, body)| (*status, body.clone()));
        Ok(HttpOutcome {
            status_code,
            body,
            reason: "Simulated".to_string(),
        })
    }
}

/// Every request fails before reaching a server
pub struct OfflineGateway;

impl HttpGateway for OfflineGateway {
    fn send(&self, _request: &HttpRequest) -> Result<HttpOutcome, NetworkError> {
        Err(NetworkError::Transport("connection refused".to_string()))
    }
}

// =============================================================================
// Input
// =============================================================================

/// Replays canned answers; running out is end of input
#[derive(Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    secrets: VecDeque<String>,
    pub asked: Vec<String>,
    pub said: Vec<String>,
}

impl ScriptedInput {
    pub fn answers(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn secrets(secrets: &[&str]) -> Self {
        Self {
            secrets: secrets.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> String {
        self.said.join("\n")
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
}

impl InputProvider for ScriptedInput {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(eof)
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.asked.push(prompt.to_string());
        self.secrets.pop_front().ok_or_else(eof)
    }

    fn say(&mut self, message: &str) {
        self.said.push(message.to_string());
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Secret store backed by a map; `broken` makes every call fail
#[derive(Default)]
pub struct MemorySecretStore {
    entries: RefCell<HashMap<String, String>>,
    broken: bool,
}

impl MemorySecretStore {
    pub fn with_token(account: &str, token: &str) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(account.to_string(), token.to_string());
        store
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn stored(&self, account: &str) -> Option<String> {
        self.entries.borrow().get(account).cloned()
    }

    fn check(&self) -> Result<(), PipelineError> {
        if self.broken {
            Err(PipelineError::Credentials("no backend".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SecretStore for MemorySecretStore {
    fn backend(&self) -> String {
        "memory".to_string()
    }

    fn get(&self, account: &str) -> Result<Option<String>, PipelineError> {
        self.check()?;
        Ok(self.stored(account))
    }

    fn set(&self, account: &str, secret: &str) -> Result<(), PipelineError> {
        self.check()?;
        self.entries.borrow_mut().insert(account.to_string(), secret.to_string());
        Ok(())
    }

    fn delete(&self, account: &str) -> Result<bool, PipelineError> {
        self.check()?;
        Ok(self.entries.borrow_mut().remove(account).is_some())
    }
}

/// Hands out a fixed authorization and counts how often it was asked
#[derive(Default)]
pub struct CountingCredentials {
    pub authorization: Option<Authorization>,
    pub calls: usize,
}

impl CountingCredentials {
    pub fn token(token: &str) -> Self {
        Self {
            authorization: Some(Authorization::Token(token.to_string())),
            calls: 0,
        }
    }
}

impl CredentialProvider for CountingCredentials {
    fn acquire(&mut self, _identity: &str) -> Result<Option<Authorization>, PipelineError> {
        self.calls += 1;
        Ok(self.authorization.clone())
    }
}

// =============================================================================
// Reporter
// =============================================================================

/// Keeps every event
#[derive(Default)]
pub struct RecordingReporter {
    pub started: Vec<String>,
    pub finished: Vec<(String, StepResult)>,
}

impl Reporter for RecordingReporter {
    fn step_started(&mut self, _index: usize, name: &str) {
        self.started.push(name.to_string());
    }

    fn step_finished(&mut self, _index: usize, name: &str, result: &StepResult) {
        self.finished.push((name.to_string(), result.clone()));
    }
}

// =============================================================================
// Filesystem fixture
// =============================================================================

/// A populated template tree and an empty project folder
pub struct Workspace {
    _templates_dir: TempDir,
    project: TempDir,
    pub templates: TemplateSet,
    pub catalog: LicenseCatalog,
}

impl Workspace {
    pub fn new() -> Self {
        let templates_dir = TempDir::new().unwrap();
        let templates = TemplateSet::new(templates_dir.path());
        fs::write(templates.gitignore(), "__pycache__/\n.venv/\n").unwrap();
        for (id, text) in [("MIT", "MIT License"), ("Unlicense", "This is free and unencumbered")] {
            let file = templates.license_file(id);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, text).unwrap();
        }
        fs::create_dir_all(templates.docs_dir().join("_layouts")).unwrap();
        fs::write(templates.docs_dir().join("_layouts/default.html"), "<html></html>").unwrap();
        let catalog = LicenseCatalog::load(&templates);

        Self {
            _templates_dir: templates_dir,
            project: TempDir::new().unwrap(),
            templates,
            catalog,
        }
    }

    pub fn folder(&self) -> &Path {
        self.project.path()
    }

    pub fn file(&self, relative: &str) -> PathBuf {
        self.project.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.file(relative)).unwrap()
    }

    pub fn spec(&self) -> ProjectSpec {
        ProjectSpec::new("My Project!", "demo", "MIT", self.folder(), &self.catalog).unwrap()
    }
}

/// Configuration for user `octo`
pub fn config(pages: bool) -> Config {
    let mut config = Config::skeleton();
    config.username = Some("octo".to_string());
    config.enable_gh_pages = pages;
    config
}
