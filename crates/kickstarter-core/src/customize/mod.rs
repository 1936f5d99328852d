//! Customizing an installed skeleton into a uniquely named project
//!
//! This module provides:
//! - Substitution rule planning (`rules`)
//! - Content and source rename passes over the project tree (`rewriter`)
//! - composer.json customization (`manifest`)
//! - SQLite `.env` preparation for the embedded application (`env`)

pub mod env;
pub mod manifest;
pub mod rewriter;
pub mod rules;

use crate::error::Result;
use crate::naming::{AuthorRecord, PackageIdentifier, ProjectNamespace};
use crate::product::SkeletonConfig;
use std::path::Path;

pub use manifest::{customize_manifest, AutoloadLayout, Manifest};
pub use rewriter::{RewriteReport, TreeRewriter};
pub use rules::{Baseline, RuleSet, SubstitutionRule};

/// Everything the user told us about the new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub identifier: PackageIdentifier,
    pub namespace: ProjectNamespace,
    pub author: Option<AuthorRecord>,
    pub description: String,
    pub license: String,
}

impl ProjectDetails {
    pub fn new(
        identifier: PackageIdentifier,
        author: Option<AuthorRecord>,
        description: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        let namespace = identifier.namespace();
        Self {
            identifier,
            namespace,
            author,
            description: description.into(),
            license: license.into(),
        }
    }

    pub fn folder_name(&self) -> String {
        self.namespace.folder_name()
    }
}

/// Counts from both rewrite passes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CustomizeReport {
    pub contents: RewriteReport,
    pub sources: RewriteReport,
}

/// Plan rules, rewrite the tree, then rewrite the manifest
///
/// Any error stops the sequence; work already done stays on disk.
pub fn customize<C: SkeletonConfig>(
    config: &C,
    project_root: &Path,
    details: &ProjectDetails,
) -> Result<CustomizeReport> {
    let baseline = config.baseline();
    let rules = RuleSet::plan(
        &baseline,
        &details.namespace,
        config.namespace_separator(),
        config.suffix_word(),
    )?;

    let rewriter = TreeRewriter::new(project_root, config.excluded_dirs());
    let contents = rewriter.rewrite_contents(&rules)?;
    let sources = rewriter.rename_sources(
        config.source_dir(),
        config.source_extension(),
        &RuleSet::rename_rule(&baseline, &details.namespace, config.suffix_word()),
    )?;

    let layout = AutoloadLayout {
        separator: config.namespace_separator(),
        test_root: config.test_namespace_root(),
        source_dir: config.source_autoload_dir(),
        test_dir: config.test_autoload_dir(),
    };
    customize_manifest(
        &project_root.join(config.manifest_file()),
        details,
        &baseline,
        &layout,
    )?;

    Ok(CustomizeReport { contents, sources })
}
