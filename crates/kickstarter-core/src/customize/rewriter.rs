//! In-place rewriting of a generated project tree
//!
//! Two passes run in order:
//! - the content pass applies a [`RuleSet`] to every file outside the
//!   excluded directories
//! - the rename pass retargets class tokens and file paths of source files
//!
//! Files are processed one at a time. Nothing is staged or rolled back: an
//! I/O error aborts the walk and leaves the tree partially rewritten.

use super::rules::{RuleSet, SubstitutionRule};
use crate::error::{KickstartError, Result};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Counts reported by a rewrite pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteReport {
    /// Files read by the pass
    pub files_visited: usize,
    /// Files whose contents changed
    pub files_rewritten: usize,
    /// Files moved to a new path
    pub files_renamed: usize,
}

/// Rewrites the tree rooted at a generated project folder
pub struct TreeRewriter<'a> {
    root: &'a Path,
    excluded_dirs: &'a [&'a str],
}

impl<'a> TreeRewriter<'a> {
    pub fn new(root: &'a Path, excluded_dirs: &'a [&'a str]) -> Self {
        Self {
            root,
            excluded_dirs,
        }
    }

    /// Apply `rules` to the contents of every file not under an excluded directory
    pub fn rewrite_contents(&self, rules: &RuleSet) -> Result<RewriteReport> {
        let excluded = self.excluded_dirs;
        let mut report = RewriteReport::default();

        let walker = WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !(entry.depth() > 0 && is_excluded(entry, excluded)));

        for entry in walker {
            let entry = entry.map_err(|err| walk_error(self.root, err))?;
            if !is_content(entry.file_type()) {
                continue;
            }

            report.files_visited += 1;
            if rewrite_file(entry.path(), rules)? {
                report.files_rewritten += 1;
            }
        }

        Ok(report)
    }

    /// Rename class tokens and paths of `*.{extension}` files under `source_dir`
    ///
    /// An existing file at a rename destination is overwritten.
    pub fn rename_sources(
        &self,
        source_dir: &str,
        extension: &str,
        rule: &SubstitutionRule,
    ) -> Result<RewriteReport> {
        let source_root = self.root.join(source_dir);
        let mut report = RewriteReport::default();
        if !source_root.is_dir() {
            return Ok(report);
        }

        let class_tokens = RuleSet::new(vec![rule.clone()])?;

        // Collect first: renaming while walking would confuse the iterator
        let mut sources = Vec::new();
        for entry in WalkDir::new(&source_root).follow_links(false) {
            let entry = entry.map_err(|err| walk_error(&source_root, err))?;
            if entry.file_type().is_file()
                && entry.path().extension() == Some(OsStr::new(extension))
            {
                sources.push(entry.into_path());
            }
        }

        for path in sources {
            report.files_visited += 1;
            if rewrite_file(&path, &class_tokens)? {
                report.files_rewritten += 1;
            }
            if let Some(target) = self.renamed_path(&path, rule) {
                move_file(&path, &target)?;
                report.files_renamed += 1;
            }
        }

        prune_emptied_dirs(&source_root, &rule.search)?;
        Ok(report)
    }

    /// The path `path` moves to, or `None` when it does not carry the token
    fn renamed_path(&self, path: &Path, rule: &SubstitutionRule) -> Option<PathBuf> {
        let relative = path.strip_prefix(self.root).ok()?.to_str()?;
        if rule.search.is_empty() || !relative.contains(&rule.search) {
            return None;
        }
        let target = self.root.join(relative.replace(&rule.search, &rule.replace));
        (target != path).then_some(target)
    }
}

/// Entries the content pass reads: anything but directories, links and pipes
///
/// Reading a pipe would block until a writer shows up, so pipes are skipped.
/// Other special files are read and fail the pass like any unreadable file.
fn is_content(file_type: fs::FileType) -> bool {
    if file_type.is_dir() || file_type.is_symlink() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_fifo() {
            return false;
        }
    }
    true
}

fn is_excluded(entry: &DirEntry, excluded: &[&str]) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| excluded.contains(&name))
}

fn walk_error(root: &Path, err: walkdir::Error) -> KickstartError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    KickstartError::RewriteIo {
        path,
        source: io::Error::from(err),
    }
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(io::Error) -> KickstartError + '_ {
    move |source| KickstartError::RewriteIo {
        path: path.to_path_buf(),
        source,
    }
}

/// Rewrite one file; returns whether its contents changed
pub(crate) fn rewrite_file(path: &Path, rules: &RuleSet) -> Result<bool> {
    let contents = fs::read(path).map_err(io_error(path))?;
    match rules.apply(&contents) {
        Cow::Owned(updated) if updated != contents => {
            fs::write(path, &updated).map_err(io_error(path))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::rename(from, to).map_err(io_error(from))
}

/// Remove directories named after the token that the rename pass emptied
fn prune_emptied_dirs(source_root: &Path, token: &str) -> Result<()> {
    if token.is_empty() {
        return Ok(());
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(source_root).contents_first(true).min_depth(1) {
        let entry = entry.map_err(|err| walk_error(source_root, err))?;
        let carries_token = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.contains(token));
        if entry.file_type().is_dir() && carries_token {
            candidates.push(entry.into_path());
        }
    }

    for dir in candidates {
        let mut entries = fs::read_dir(&dir).map_err(io_error(&dir))?;
        if entries.next().is_none() {
            fs::remove_dir(&dir).map_err(io_error(&dir))?;
        }
    }
    Ok(())
}
