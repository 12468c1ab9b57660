use crate::{
    config::Layout,
    errors::{FileOperation, IoError},
    utils::{self, clear_dir, ensure_dir, CopyError},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{fs, path::Path};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("I/O error within project domain")]
    #[diagnostic(code(xwalk_corelib::project::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Copy(#[from] CopyError),
}

const RELEASE_MODE: &str = "Release";

const SRC_README: &str = "# Source folder for xwalk_core_library\n\
## Why it's empty\n\
xwalk_core_library doesn't contain java sources.\n\
## Why put me here\n\
To make archives keep the folder, the src directory is needed to build an apk by ant.";

/// Empties `<out_dir>/<library>` and makes sure the directory exists.
pub fn clean_library_project(out_dir: &Path, layout: &Layout) -> Result<(), ProjectError> {
    let library_dir = out_dir.join(&layout.library_name);

    clear_dir(&library_dir)?;
    ensure_dir(&library_dir)?;

    Ok(())
}

/// Copies the manifest and build files from the template directory of the source tree.
pub fn copy_project_files(source: &Path, out_dir: &Path, layout: &Layout) -> Result<(), ProjectError> {
    println!("{}", "Copying library project files...".bright_blue());

    let template_dir = source.join(&layout.template_dir);

    utils::copy_named_files(
        &layout.project_files,
        &template_dir,
        &out_dir.join(&layout.library_name),
    )?;

    Ok(())
}

/// Copies the JS API binding files into `res/raw/`, flattened to their file names.
pub fn copy_js_binding_files(source: &Path, out_dir: &Path, layout: &Layout) -> Result<(), ProjectError> {
    println!("{}", "Copying js binding files...".bright_blue());

    let raw_dir = out_dir.join(&layout.library_name).join("res").join("raw");
    ensure_dir(&raw_dir)?;

    utils::copy_named_files(&layout.js_bindings, source, &raw_dir)?;

    Ok(())
}

/// Removes AIDL files that must not ship with the library. Absent files are skipped.
pub fn post_copy_library_project(out_dir: &Path, layout: &Layout) -> Result<(), ProjectError> {
    println!("{}", "Post Copy Library Project...".bright_blue());

    let src_dir = out_dir.join(&layout.library_name).join("src");

    for aidl in &layout.stale_aidls {
        let aidl_file = src_dir.join(aidl);
        if aidl_file.exists() {
            log::debug!("remove {}", aidl_file.display());
            fs::remove_file(&aidl_file)
                .map_err(|error| IoError::new(FileOperation::Remove, aidl_file.clone(), error))?;
        }
    }

    Ok(())
}

/// Drops debug-only files from `libs_dir` when `mode` is `Release`. Returns how many were removed.
pub fn remove_unused_files_in_release_mode(
    mode: &str,
    libs_dir: &Path,
    layout: &Layout,
) -> Result<usize, ProjectError> {
    if mode != RELEASE_MODE || !libs_dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;

    for entry in WalkDir::new(libs_dir) {
        let entry = entry.map_err(IoError::from)?;
        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if layout.release_excludes.iter().any(|name| *name == file_name) {
            log::debug!("remove {}", entry.path().display());
            fs::remove_file(entry.path())
                .map_err(|error| IoError::new(FileOperation::Remove, entry.path().into(), error))?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Creates the otherwise empty `src/` directory with a README so archives keep it.
pub fn create_src_placeholder(out_dir: &Path, layout: &Layout) -> Result<(), ProjectError> {
    let src_dir = out_dir.join(&layout.library_name).join("src");
    ensure_dir(&src_dir)?;

    let readme = src_dir.join("README.md");
    fs::write(&readme, SRC_README)
        .map_err(|error| IoError::new(FileOperation::Write, readme.clone(), error))?;

    Ok(())
}
