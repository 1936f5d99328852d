//! External tools and the processes that drive them
//!
//! This module provides:
//! - A streaming shell command runner
//! - Package manager (composer) detection
//! - Advisory tool probing (php, composer, yarn)
//! - Typed descriptors of every external setup step

pub mod check;
pub mod composer;
pub mod process;
pub mod step;

pub use check::{check_tools, ToolInfo};
pub use composer::Composer;
pub use process::{CommandRunner, ProcessRunner, ShellCommand};
pub use step::{SetupStep, StepContext};
