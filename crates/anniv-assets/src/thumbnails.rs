//! Thumbnail renaming for content directories

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anniv_core::AnnivResult;
use serde::Serialize;
use tracing::{debug, info, warn};

/// File extensions treated as images, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// Prefix of staged names while a directory is being renamed
const STAGING_PREFIX: &str = ".anniv-staging-";

/// One planned rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Renames planned for one content directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryPlan {
    pub directory: PathBuf,
    pub renames: Vec<Rename>,
}

impl DirectoryPlan {
    /// True if the directory already follows the naming scheme
    pub fn is_noop(&self) -> bool {
        self.renames.iter().all(|r| r.from == r.to)
    }
}

/// Outcome of a run over the asset root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThumbnailReport {
    pub directories: usize,
    /// Directories without a single image
    pub empty: Vec<PathBuf>,
    pub renamed: usize,
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Target file name for image `index` of `count` with extension `ext`.
///
/// The extension keeps its original case.
pub fn thumbnail_name(index: usize, count: usize, ext: &str) -> String {
    if count == 1 {
        format!("thumbnail.{}", ext)
    } else {
        format!("thumbnail-{}.{}", index, ext)
    }
}

/// Plan renames for one directory: images sorted by name, then numbered
pub fn plan_directory(directory: &Path) -> AnnivResult<DirectoryPlan> {
    let mut images = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_image(&path) {
            images.push(path);
        }
    }
    images.sort();

    let count = images.len();
    let renames = images
        .into_iter()
        .enumerate()
        .map(|(index, from)| {
            let ext = from
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            let to = directory.join(thumbnail_name(index, count, &ext));
            Rename { from, to }
        })
        .collect();

    Ok(DirectoryPlan {
        directory: directory.to_path_buf(),
        renames,
    })
}

/// Plan renames for every direct subdirectory of `root`, in name order
pub fn plan_root(root: &Path) -> AnnivResult<Vec<DirectoryPlan>> {
    let mut directories = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            directories.push(entry.path());
        }
    }
    directories.sort();

    directories.iter().map(|dir| plan_directory(dir)).collect()
}

/// Carry out a plan.
///
/// Files move to unused staging names first and then to their targets, so a
/// target that is also another file's current name is never overwritten.
/// Staging names keep the image extension. If any move fails, every file is
/// moved back to its original name before the error is returned.
pub fn apply_plan(plan: &DirectoryPlan) -> AnnivResult<usize> {
    let pending: Vec<&Rename> = plan.renames.iter().filter(|r| r.from != r.to).collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let mut staged: Vec<(PathBuf, &Rename)> = Vec::with_capacity(pending.len());
    let mut counter = 0;
    for rename in &pending {
        let staging = staging_path(&plan.directory, &rename.from, &mut counter);
        if let Err(err) = move_to_free(&rename.from, &staging) {
            roll_back(&staged, &[]);
            return Err(err.into());
        }
        staged.push((staging, *rename));
    }

    let mut finished: Vec<(PathBuf, &Rename)> = Vec::with_capacity(staged.len());
    for (staging, rename) in &staged {
        if let Err(err) = move_to_free(staging, &rename.to) {
            warn!(
                to = %rename.to.display(),
                error = %err,
                "rename failed, restoring original names"
            );
            roll_back(&staged, &finished);
            return Err(err.into());
        }
        finished.push((staging.clone(), *rename));
    }

    for rename in &pending {
        info!(
            from = %rename.from.display(),
            to = %rename.to.display(),
            "renamed image"
        );
    }
    Ok(pending.len())
}

/// First `<prefix><n>.<ext>` in `directory` that does not exist yet
fn staging_path(directory: &Path, from: &Path, counter: &mut usize) -> PathBuf {
    let ext = from.extension().and_then(|e| e.to_str()).unwrap_or_default();
    loop {
        let candidate = directory.join(format!("{}{}.{}", STAGING_PREFIX, *counter, ext));
        *counter += 1;
        if fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
    }
}

/// Rename that fails instead of replacing whatever sits at `to`
fn move_to_free(from: &Path, to: &Path) -> io::Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }
    fs::rename(from, to)
}

/// Undo a partial run: finished targets go back to staging, then every
/// staged file returns to its original name.
fn roll_back(staged: &[(PathBuf, &Rename)], finished: &[(PathBuf, &Rename)]) {
    for (staging, rename) in finished.iter().rev() {
        if let Err(err) = move_to_free(&rename.to, staging) {
            warn!(path = %rename.to.display(), error = %err, "could not restore image");
        }
    }
    for (staging, rename) in staged.iter().rev() {
        if let Err(err) = move_to_free(staging, &rename.from) {
            warn!(path = %staging.display(), error = %err, "could not restore image");
        }
    }
}

/// Rename the images of every content directory under `root`.
///
/// With `dry_run` only the plan is logged and reported.
pub fn rename_thumbnails(root: &Path, dry_run: bool) -> AnnivResult<ThumbnailReport> {
    let plans = plan_root(root)?;
    let mut report = ThumbnailReport {
        directories: plans.len(),
        ..Default::default()
    };

    for plan in &plans {
        if plan.renames.is_empty() {
            warn!(directory = %plan.directory.display(), "no image files found");
            report.empty.push(plan.directory.clone());
            continue;
        }
        if plan.is_noop() {
            debug!(directory = %plan.directory.display(), "already named");
            continue;
        }
        if dry_run {
            for rename in plan.renames.iter().filter(|r| r.from != r.to) {
                info!(
                    from = %rename.from.display(),
                    to = %rename.to.display(),
                    "would rename image"
                );
                report.renamed += 1;
            }
        } else {
            report.renamed += apply_plan(plan)?;
        }
    }

    Ok(report)
}
