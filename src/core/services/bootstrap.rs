//! The bootstrap run: every step from readme to pages rebuild
//!
//! Step order is fixed:
//!
//! 1. readme, templates, pages index and config (scaffold)
//! 2. environment, linter, interpreter, editor settings (provisioning)
//! 3. init, stage, commit (local repository)
//! 4. create remote, add origin, push (remote repository)
//! 5. enable pages, rebuild personal site
//!
//! Pages steps exist only when pages are enabled in the configuration.
//! Credentials are acquired at the first step that talks to the platform.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::core::models::{Authorization, LicenseCatalog, ProjectSpec, StepResult, TemplateSet};
use crate::core::ports::{CommandRunner, CredentialProvider, HttpGateway, Reporter};
use crate::core::services::environment::EnvironmentProvisioner;
use crate::core::services::pipeline::{Pipeline, StepFailure, StepRecord};
use crate::core::services::remote::RemoteRepositoryManager;
use crate::core::services::scaffold::ScaffoldWriter;
use crate::core::services::vcs::GitDriver;
use crate::error::PipelineError;

/// State carried from one step to the next
pub struct RunContext<'c> {
    credentials: &'c mut dyn CredentialProvider,
    authorization: Option<Authorization>,
    interpreter: Option<String>,
    branch: Option<String>,
    full_name: Option<String>,
}

impl std::fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("authorized", &self.authorization.is_some())
            .field("interpreter", &self.interpreter)
            .field("branch", &self.branch)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

impl<'c> RunContext<'c> {
    /// Fresh context drawing credentials from `credentials`
    pub fn new(credentials: &'c mut dyn CredentialProvider) -> Self {
        Self {
            credentials,
            authorization: None,
            interpreter: None,
            branch: None,
            full_name: None,
        }
    }

    /// Authorization for `identity`, acquired on first use
    pub fn authorization(&mut self, identity: &str) -> Result<Authorization, PipelineError> {
        if let Some(auth) = &self.authorization {
            return Ok(auth.clone());
        }
        let auth = self.credentials.acquire(identity)?.ok_or_else(|| {
            PipelineError::Credentials(format!("no credentials available for `{identity}`"))
        })?;
        self.authorization = Some(auth.clone());
        Ok(auth)
    }

    /// Branch settled by the repository initialization, or `default`
    #[must_use]
    pub fn branch<'s>(&'s self, default: &'s str) -> &'s str {
        self.branch.as_deref().unwrap_or(default)
    }

    /// Canonical `owner/name` assigned by the platform
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    fn created_remote(&self) -> Result<&str, PipelineError> {
        self.full_name
            .as_deref()
            .ok_or_else(|| PipelineError::Config("the remote repository was not created".to_string()))
    }
}

/// What a finished run reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Log file of this run, when file logging is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Local project folder
    pub project_folder: PathBuf,
    /// Web address of the remote repository
    pub remote_url: String,
    /// Every step, in order
    pub steps: Vec<StepRecord>,
}

/// Everything a run needs except the project itself
pub struct Bootstrap<'a> {
    config: &'a Config,
    identity: &'a str,
    writer: ScaffoldWriter<'a>,
    runner: &'a dyn CommandRunner,
    gateway: &'a dyn HttpGateway,
}

impl std::fmt::Debug for Bootstrap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<'a> Bootstrap<'a> {
    /// Check the configuration and templates before any step can run
    pub fn new(
        config: &'a Config,
        templates: &'a TemplateSet,
        catalog: &'a LicenseCatalog,
        runner: &'a dyn CommandRunner,
        gateway: &'a dyn HttpGateway,
    ) -> Result<Self, PipelineError> {
        let identity = config.identity()?;
        if !templates.exists() {
            return Err(PipelineError::Config(format!(
                "template folder `{}` is missing. Run `husk setup` first",
                templates.root().display()
            )));
        }
        Ok(Self {
            config,
            identity,
            writer: ScaffoldWriter::new(templates, catalog),
            runner,
            gateway,
        })
    }

    fn web_url(&self, full_name: &str) -> String {
        format!("{}/{full_name}", self.config.web_url.trim_end_matches('/'))
    }

    /// The ordered steps for `spec`
    #[must_use]
    pub fn pipeline<'p, 'c>(&'p self, spec: &'p ProjectSpec) -> Pipeline<'p, RunContext<'c>> {
        let config = self.config;
        let identity = self.identity;
        let gateway = self.gateway;
        let writer = self.writer;
        let env = EnvironmentProvisioner::new(self.runner);
        let git = GitDriver::new(self.runner);
        let folder = spec.folder.as_path();
        let pages = config.enable_gh_pages;

        Pipeline::new()
            .step("readme", move |_: &mut RunContext<'c>| {
                writer.write_readme(spec, &config.readme_content)
            })
            .step("templates", move |_: &mut RunContext<'c>| writer.copy_templates(spec, pages))
            .step_if(pages, "pages index", move |_: &mut RunContext<'c>| {
                writer.write_pages_index(spec)
            })
            .step_if(pages, "pages config", move |_: &mut RunContext<'c>| {
                writer.write_pages_config(spec, &config.jekyll_config)
            })
            .step("environment", move |_: &mut RunContext<'c>| {
                env.create(folder, &config.python_version)
            })
            .step("linter", move |_: &mut RunContext<'c>| env.install_dev(folder, &config.linter))
            .step("interpreter", move |ctx: &mut RunContext<'c>| {
                let interpreter = env.interpreter_path(folder)?;
                let message = format!("Interpreter path is `{interpreter}`.");
                ctx.interpreter = Some(interpreter);
                Ok(StepResult::done(message))
            })
            .step("editor settings", move |ctx: &mut RunContext<'c>| {
                let interpreter = ctx.interpreter.as_deref().unwrap_or_default();
                writer.write_editor_settings(folder, &config.linter, interpreter)
            })
            .step("git init", move |ctx: &mut RunContext<'c>| {
                let (result, branch) = git.init(folder, &config.branch)?;
                ctx.branch = Some(branch);
                Ok(result)
            })
            .step("stage", move |_: &mut RunContext<'c>| git.stage_all(folder))
            .step("commit", move |_: &mut RunContext<'c>| git.commit(folder))
            .step("create remote", move |ctx: &mut RunContext<'c>| {
                let auth = ctx.authorization(identity)?;
                let remote = RemoteRepositoryManager::new(gateway, &config.api_url, identity, &auth);
                let full_name = remote.create_repository(&spec.name, &spec.description)?;
                if full_name != format!("{identity}/{}", spec.name) {
                    log::warn!("The platform named the repository `{full_name}`.");
                }
                let message = format!("Remote repository `{full_name}` created.");
                ctx.full_name = Some(full_name);
                Ok(StepResult::done(message))
            })
            .step("add origin", move |ctx: &mut RunContext<'c>| {
                let url = self.web_url(ctx.created_remote()?);
                git.add_origin(folder, &url)
            })
            .step("push", move |ctx: &mut RunContext<'c>| {
                git.push(folder, ctx.branch(&config.branch))
            })
            .step_if(pages, "enable pages", move |ctx: &mut RunContext<'c>| {
                let auth = ctx.authorization(identity)?;
                let remote = RemoteRepositoryManager::new(gateway, &config.api_url, identity, &auth);
                remote.enable_pages(ctx.created_remote()?, ctx.branch(&config.branch))
            })
            .step_if(pages, "rebuild blog", move |ctx: &mut RunContext<'c>| {
                let auth = ctx.authorization(identity)?;
                let remote = RemoteRepositoryManager::new(gateway, &config.api_url, identity, &auth);
                remote.rebuild_user_pages(identity)
            })
    }

    /// Run every step for `spec`, stopping at the first failure
    pub fn run(
        &self,
        spec: &ProjectSpec,
        credentials: &mut dyn CredentialProvider,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, StepFailure> {
        let mut ctx = RunContext::new(credentials);
        let steps = self.pipeline(spec).run(&mut ctx, reporter)?;
        let remote_url = ctx.full_name().map(|name| self.web_url(name)).unwrap_or_default();
        Ok(RunSummary {
            log_file: None,
            project_folder: spec.folder.clone(),
            remote_url,
            steps,
        })
    }
}
