//! Commit-driven tree mutation.
//!
//! Each path is applied independently. A failure on one path (missing folder, duplicate file,
//! invalid segment) is logged, recorded as a [`PathWarning`] and skipped; the remaining paths
//! are still applied.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::history::Commit;
use crate::tree::{FileId, FolderId, Tree};

/// A path that could not be applied, together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWarning {
    pub path: String,
    pub error: Error,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub created_folders: Vec<FolderId>,
    pub created_files: Vec<FileId>,
    pub removed_files: usize,
    pub changed_files: Vec<FileId>,
    /// Folders that directly hold an added, removed or changed file, in first-touch order.
    pub touched_folders: IndexSet<FolderId>,
    pub warnings: Vec<PathWarning>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn absorb(&mut self, path: &str, op: &'static str, error: Error) {
        warn!(path, op, %error, "skipping path");
        self.warnings.push(PathWarning {
            path: path.to_string(),
            error,
        });
    }
}

/// Applies a commit: deletions first, then additions, then changed-file marking.
///
/// Deleting before adding lets a commit that moves a file onto a freed name succeed.
pub fn apply_commit(tree: &mut Tree, commit: &Commit) -> ApplyReport {
    let mut report = ApplyReport::default();
    remove_paths(tree, &commit.deleted_files, &mut report);
    add_paths(tree, &commit.new_files, &mut report);
    mark_paths(tree, &commit.changed_files, &mut report);
    debug!(
        hash = commit.short_hash(),
        created = report.created_files.len(),
        removed = report.removed_files,
        changed = report.changed_files.len(),
        warnings = report.warnings.len(),
        "applied commit"
    );
    report
}

/// Creates every missing folder along each path and a file at its end.
pub fn add_paths<S: AsRef<str>>(tree: &mut Tree, paths: &[S], report: &mut ApplyReport) {
    for path in paths {
        let path = path.as_ref();
        if let Err(error) = add_path(tree, path, report) {
            report.absorb(path, "add", error);
        }
    }
}

/// Removes the file at the end of each path. Folders are only looked up, never created, and are
/// left in place even when they become empty.
pub fn remove_paths<S: AsRef<str>>(tree: &mut Tree, paths: &[S], report: &mut ApplyReport) {
    for path in paths {
        let path = path.as_ref();
        if let Err(error) = remove_path(tree, path, report) {
            report.absorb(path, "remove", error);
        }
    }
}

/// Resolves each path to an existing file and records it as changed.
pub fn mark_paths<S: AsRef<str>>(tree: &mut Tree, paths: &[S], report: &mut ApplyReport) {
    for path in paths {
        let path = path.as_ref();
        match find_path(tree, path) {
            Ok((folder, file)) => {
                report.changed_files.push(file);
                report.touched_folders.insert(folder);
            }
            Err(error) => report.absorb(path, "change", error),
        }
    }
}

fn add_path(tree: &mut Tree, path: &str, report: &mut ApplyReport) -> Result<()> {
    let (dirs, file) = split_path(path)?;
    let mut folder = tree.root();
    for segment in dirs {
        folder = if tree.name_exists(folder, segment) {
            tree.find_folder(folder, segment)?
        } else {
            let created = tree.create_folder(folder, segment)?;
            report.created_folders.push(created);
            created
        };
    }
    let id = tree.create_file(folder, file)?;
    report.created_files.push(id);
    report.touched_folders.insert(folder);
    Ok(())
}

fn remove_path(tree: &mut Tree, path: &str, report: &mut ApplyReport) -> Result<()> {
    let (dirs, file) = split_path(path)?;
    let folder = descend(tree, &dirs)?;
    tree.remove_file(folder, file)?;
    report.removed_files += 1;
    report.touched_folders.insert(folder);
    Ok(())
}

fn find_path(tree: &Tree, path: &str) -> Result<(FolderId, FileId)> {
    let (dirs, file) = split_path(path)?;
    let folder = descend(tree, &dirs)?;
    Ok((folder, tree.find_file(folder, file)?))
}

fn descend(tree: &Tree, dirs: &[&str]) -> Result<FolderId> {
    dirs.iter()
        .try_fold(tree.root(), |folder, segment| tree.find_folder(folder, segment))
}

/// Splits `a/b/c.txt` into `(["a", "b"], "c.txt")`. Empty and `.` segments are dropped, so
/// `./a//b.txt` and `a/b.txt` name the same file.
fn split_path(path: &str) -> Result<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let file = segments.pop().ok_or_else(|| Error::InvalidName {
        name: path.to_string(),
        reason: "path has no file segment",
    })?;
    Ok((segments, file))
}
