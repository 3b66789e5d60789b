//! Version control driver - local repository via the `git` CLI

use std::path::Path;

use crate::core::models::StepResult;
use crate::core::ports::CommandRunner;
use crate::error::{PipelineError, ProcessError};
use crate::paths;

const GIT: &str = "git";

/// Drives `git` through the command runner
#[derive(Clone, Copy)]
pub struct GitDriver<'a> {
    runner: &'a dyn CommandRunner,
}

impl std::fmt::Debug for GitDriver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitDriver").finish_non_exhaustive()
    }
}

impl<'a> GitDriver<'a> {
    /// Driver running commands through `runner`
    #[must_use]
    pub const fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// `git init`, then settle the branch to publish.
    ///
    /// A fresh repository has an unborn HEAD, which is pointed at `branch`.
    /// A repository that already has commits keeps its current branch.
    /// Returns the step result and the branch in use.
    pub fn init(&self, folder: &Path, branch: &str) -> Result<(StepResult, String), PipelineError> {
        let output = self.runner.run(&[GIT, "init"], folder)?;
        let message = output.trim().to_string();

        if self.has_commits(folder)? {
            let current = self.runner.run(&[GIT, "symbolic-ref", "--short", "HEAD"], folder)?;
            let current = current.trim().to_string();
            log::info!("Existing history found, keeping branch `{current}`.");
            let result = StepResult::done(message).with_detail(format!("kept branch `{current}`"));
            return Ok((result, current));
        }

        let head = format!("refs/heads/{branch}");
        self.runner.run(&[GIT, "symbolic-ref", "HEAD", &head], folder)?;
        Ok((StepResult::done(message), branch.to_string()))
    }

    fn has_commits(&self, folder: &Path) -> Result<bool, PipelineError> {
        match self.runner.run(&[GIT, "rev-parse", "--verify", "-q", "HEAD"], folder) {
            Ok(_) => Ok(true),
            Err(ProcessError::Exit { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// `git add -A`
    pub fn stage_all(&self, folder: &Path) -> Result<StepResult, PipelineError> {
        self.runner.run(&[GIT, "add", "-A"], folder)?;
        Ok(StepResult::done(
            "All not ignored files in project directory have been staged.",
        ))
    }

    /// Initial commit, attributed to this tool
    pub fn commit(&self, folder: &Path) -> Result<StepResult, PipelineError> {
        let attribution = format!("by `{}/{}`", paths::PROGRAM, crate::VERSION);
        let output = self
            .runner
            .run(&[GIT, "commit", "-m", "initial commit", "-m", &attribution], folder)?;
        Ok(StepResult::done("Local commit completed.").with_detail(output))
    }

    /// `git remote add origin <url>.git`
    pub fn add_origin(&self, folder: &Path, remote_url: &str) -> Result<StepResult, PipelineError> {
        let url = format!("{remote_url}.git");
        self.runner.run(&[GIT, "remote", "add", "origin", &url], folder)?;
        Ok(StepResult::done("Remote repository added."))
    }

    /// `git push -u origin <branch>`
    pub fn push(&self, folder: &Path, branch: &str) -> Result<StepResult, PipelineError> {
        let output = self.runner.run(&[GIT, "push", "-u", "origin", branch], folder)?;
        Ok(StepResult::done("Push to remote repository completed.").with_detail(output))
    }
}
