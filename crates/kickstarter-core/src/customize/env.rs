//! Switching the embedded application to an SQLite database

use super::rewriter::{io_error, rewrite_file};
use super::rules::{RuleSet, SubstitutionRule};
use crate::error::Result;
use std::fs;
use std::path::Path;

const MYSQL_DATABASE_URL: &str =
    "DATABASE_URL=mysql://root@127.0.0.1/sylius_%kernel.environment%?serverVersion=5.5";
const SQLITE_DATABASE_URL: &str = "DATABASE_URL=sqlite:///%kernel.project_dir%/var/data.db";

/// Copy `.env.dist` to `.env` and point `DATABASE_URL` at a local SQLite file
///
/// The MySQL line is kept, commented out, above the SQLite one. Returns
/// whether the MySQL line was found.
pub fn prepare_sqlite_env(application_dir: &Path) -> Result<bool> {
    let dist = application_dir.join(".env.dist");
    let env = application_dir.join(".env");
    fs::copy(&dist, &env).map_err(io_error(&dist))?;

    let rules = RuleSet::new(vec![SubstitutionRule::new(
        MYSQL_DATABASE_URL,
        format!("#{}\n{}", MYSQL_DATABASE_URL, SQLITE_DATABASE_URL),
    )])?;
    rewrite_file(&env, &rules)
}
