//! Charm-style CLI prompts using cliclack

use crate::product::SkeletonConfig;
use crate::runtime::{check_tools, Composer, ProcessRunner};
use crate::workflow::{self, Interaction, InstallOptions, InstallWorkflow};
use anyhow::{Context, Result};
use std::io;

/// [`Interaction`] backed by cliclack prompts and log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct ClackInteraction;

impl Interaction for ClackInteraction {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        let mut input = cliclack::input(prompt);
        match default {
            Some("") => input = input.required(false),
            Some(default) => input = input.default_input(default).placeholder(default),
            None => {}
        }
        input.interact()
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        cliclack::confirm(prompt).initial_value(default).interact()
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::success(message)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::warning(message)
    }
}

/// Run the install with interactive prompts
pub async fn run<C: SkeletonConfig>(config: &C, options: InstallOptions) -> Result<()> {
    cliclack::intro(format!("Welcome to {}", config.display_name()))?;
    cliclack::log::remark("We will guide you through the installation.")?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let mut ui = ClackInteraction;

    // Step 1: Gather and validate the answers
    let details = workflow::gather(config, &options, &mut ui)?;

    // Step 2: Detect the package manager and report the tools we will call
    let composer = Composer::detect(&cwd, config.composer_env());
    report_tools(&composer)?;

    let skeleton_package = std::env::var(config.skeleton_package_env())
        .ok()
        .filter(|package| !package.trim().is_empty())
        .unwrap_or_else(|| config.skeleton_package().to_string());
    if skeleton_package != config.skeleton_package() {
        cliclack::log::info(format!("Using skeleton package {}", skeleton_package))?;
    }

    // Step 3: Install and customize
    let runner = ProcessRunner::new();
    let outcome = InstallWorkflow::new(config, &details, &options, cwd, composer, skeleton_package)
        .execute(&mut ui, &runner)
        .await?;

    if !outcome.failed.is_empty() {
        cliclack::log::warning(format!(
            "{} optional step(s) failed, see the messages above",
            outcome.failed.len()
        ))?;
    }

    cliclack::outro(format!("cd {}", outcome.project_dir.display()))?;
    Ok(())
}

fn report_tools(composer: &Composer) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");
    let tools = check_tools(composer);
    spinner.stop("Tools checked");

    for tool in tools {
        match (tool.available, tool.version) {
            (true, Some(version)) => {
                cliclack::log::success(format!("{} found ({})", tool.name, version))?
            }
            (true, None) => cliclack::log::success(format!("{} found", tool.name))?,
            (false, _) => cliclack::log::warning(format!(
                "{} not found, steps that need it will fail",
                tool.name
            ))?,
        }
    }
    Ok(())
}
