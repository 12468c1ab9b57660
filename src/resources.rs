use crate::{
    config::Layout,
    errors::{FileOperation, IoError},
    transactions::{Active, RollbackOperation, Transaction},
    utils::{ensure_dir, remove_dir_if_exists},
};
use colored::Colorize;
use indexmap::IndexMap;
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum ResourceError {
    #[error("I/O error within resource domain")]
    #[diagnostic(code(xwalk_corelib::resources::io))]
    Io(#[from] IoError),

    #[error("Resource zip not found: {path}")]
    #[diagnostic(
        code(xwalk_corelib::resources::missing_zip),
        help("The Java resource archives are produced by the Android build; build it first")
    )]
    MissingResourceZip { path: PathBuf },

    #[error("Resource zip name conflict: {name}")]
    #[diagnostic(
        code(xwalk_corelib::resources::zip_name_conflict),
        help("Two resource archives share the same name without extension")
    )]
    ResourceZipNameConflict { name: String },

    #[error("Unable to extract resource zip '{path}'")]
    #[diagnostic(code(xwalk_corelib::resources::extract))]
    Extract {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Resource '{path}' already exists even after prefixing with the archive name")]
    #[diagnostic(
        code(xwalk_corelib::resources::collision),
        help("Two archives ship the same resource under the same prefixed name")
    )]
    ResourceCollision { path: PathBuf },

    #[error("Cannot move '{from}': '{to}' already exists")]
    #[diagnostic(
        code(xwalk_corelib::resources::density_collision),
        help("An image is present both in an mdpi-qualified directory and in its unqualified counterpart")
    )]
    DensityCollision { from: PathBuf, to: PathBuf },
}

/// Outcome of merging one extracted archive into the resource tree.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub copied: usize,
    /// Relative path as shipped in the archive mapped to the relative path it was written to.
    pub renamed: IndexMap<PathBuf, PathBuf>,
}

/// Copies every file under `input_dir` to the same relative path under `output_dir`.
///
/// When the destination already exists the incoming file is written next to it as
/// `<prefix>_<file name>`, so resources from different archives never replace each other.
/// Files and directories created here are registered on `trx`.
pub fn copy_dir_and_prefix_duplicates(
    input_dir: &Path,
    output_dir: &Path,
    prefix: &str,
    trx: &mut Transaction<Active>,
) -> Result<MergeReport, ResourceError> {
    ensure_dir(output_dir)?;

    let mut report = MergeReport::default();

    for entry in WalkDir::new(input_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(IoError::from)?;
        let relative = entry
            .path()
            .strip_prefix(input_dir)
            .unwrap_or_else(|_| entry.path());
        let target = output_dir.join(relative);

        if entry.file_type().is_dir() {
            if ensure_dir(&target)? {
                trx.add_operation(RollbackOperation::RemoveDir(target));
            }
            continue;
        }

        let target = if fs::symlink_metadata(&target).is_ok() {
            let file_name = entry.file_name().to_string_lossy();
            let renamed = target.with_file_name(format!("{}_{}", prefix, file_name));

            if fs::symlink_metadata(&renamed).is_ok() {
                return Err(ResourceError::ResourceCollision { path: renamed });
            }

            let renamed_relative = relative.with_file_name(format!("{}_{}", prefix, file_name));
            log::info!(
                "{} already exists, writing {}",
                relative.display(),
                renamed_relative.display()
            );
            report
                .renamed
                .insert(relative.to_path_buf(), renamed_relative);

            renamed
        } else {
            target
        };

        log::debug!("copy {} -> {}", entry.path().display(), target.display());
        fs::copy(entry.path(), &target)
            .map_err(|error| IoError::new(FileOperation::Copy, entry.path().into(), error))?;
        trx.add_operation(RollbackOperation::RemoveFile(target));

        report.copied += 1;
    }

    Ok(report)
}

/// Name of the directory an mdpi-qualified drawable directory folds into, if `dir_name` is one.
///
/// `drawable-ldrtl-mdpi-v17` becomes `drawable-ldrtl-v17`, `drawable-mdpi` becomes `drawable`.
pub fn non_mdpi_name(dir_name: &str) -> Option<String> {
    let components: Vec<&str> = dir_name.split('-').collect();

    if components[0] != "drawable" || !components.contains(&"mdpi") {
        return None;
    }

    let stripped: Vec<&str> = components.into_iter().filter(|c| *c != "mdpi").collect();

    Some(stripped.join("-"))
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|error| IoError::new(FileOperation::ReadDir, dir.into(), error))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| IoError::new(FileOperation::ReadDir, dir.into(), error))?;

    entries.sort();

    Ok(entries)
}

/// Moves the `.png` files of every `drawable-*mdpi*` directory under `res_root` into the
/// directory named without the `mdpi` qualifier. Returns the number of images moved.
pub fn move_images_to_non_mdpi_folders(res_root: &Path) -> Result<usize, ResourceError> {
    let mut moved = 0;

    for src_dir in sorted_entries(res_root)? {
        let Some(dst_name) = src_dir
            .file_name()
            .and_then(|name| non_mdpi_name(&name.to_string_lossy()))
        else {
            continue;
        };
        if !src_dir.is_dir() {
            continue;
        }

        let dst_dir = res_root.join(dst_name);
        ensure_dir(&dst_dir)?;

        for src_file in sorted_entries(&src_dir)? {
            let is_png = src_file
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(".png"))
                .unwrap_or(false);
            if !is_png {
                continue;
            }

            let dst_file = dst_dir.join(src_file.file_name().unwrap_or_default());
            if fs::symlink_metadata(&dst_file).is_ok() {
                return Err(ResourceError::DensityCollision {
                    from: src_file,
                    to: dst_file,
                });
            }

            log::debug!("move {} -> {}", src_file.display(), dst_file.display());
            fs::rename(&src_file, &dst_file)
                .map_err(|error| IoError::new(FileOperation::Move, src_file.clone(), error))?;
            moved += 1;
        }
    }

    Ok(moved)
}

/// Removes every directory below `root` that holds no files, deepest first.
pub fn prune_empty_dirs(root: &Path) -> Result<(), IoError> {
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let is_empty = fs::read_dir(path)
            .map_err(|error| IoError::new(FileOperation::ReadDir, path.into(), error))?
            .next()
            .is_none();

        if is_empty {
            log::debug!("prune {}", path.display());
            fs::remove_dir(path)
                .map_err(|error| IoError::new(FileOperation::Rmdir, path.into(), error))?;
        }
    }

    Ok(())
}

fn extract(zip_file: &Path, destination: &Path) -> Result<(), ResourceError> {
    let file = fs::File::open(zip_file)
        .map_err(|error| IoError::new(FileOperation::Read, zip_file.into(), error))?;

    zip::ZipArchive::new(file)
        .and_then(|mut archive| archive.extract(destination))
        .map_err(|error| ResourceError::Extract {
            path: zip_file.to_path_buf(),
            source: error,
        })
}

/// Rebuilds `res/` of the library project from the Java resource archives in `<out_dir>/res.java`.
///
/// Archives are merged in [`Layout::resource_zips`] order, each one inside its own
/// [`Transaction`], and the mdpi fix-up runs after every archive.
pub fn copy_resources(out_dir: &Path, layout: &Layout) -> Result<(), ResourceError> {
    println!("{}", "Copying resources...".bright_blue());

    let library_dir = out_dir.join(&layout.library_name);
    let res_dir = library_dir.join("res");
    remove_dir_if_exists(&res_dir)?;
    ensure_dir(&res_dir)?;

    let temp_dir = tempfile::Builder::new()
        .prefix("temp")
        .tempdir_in(&library_dir)
        .map_err(|error| IoError::new(FileOperation::Mkdir, library_dir.clone(), error))?;

    for res_zip in &layout.resource_zips {
        let zip_file = out_dir.join("res.java").join(res_zip);
        if !zip_file.is_file() {
            return Err(ResourceError::MissingResourceZip { path: zip_file });
        }

        let zip_name = Path::new(res_zip)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| res_zip.clone());

        let subdir = temp_dir.path().join(&zip_name);
        if subdir.is_dir() {
            return Err(ResourceError::ResourceZipNameConflict { name: zip_name });
        }
        ensure_dir(&subdir)?;
        extract(&zip_file, &subdir)?;

        let mut trx = Transaction::<Active>::new();
        let report = copy_dir_and_prefix_duplicates(&subdir, &res_dir, &zip_name, &mut trx)?;
        trx.commit();

        log::info!(
            "merged {}: {} files, {} renamed",
            res_zip,
            report.copied,
            report.renamed.len()
        );

        move_images_to_non_mdpi_folders(&res_dir)?;
    }

    prune_empty_dirs(&res_dir)?;

    let temp_path = temp_dir.path().to_path_buf();
    temp_dir
        .close()
        .map_err(|error| IoError::new(FileOperation::Rmdir, temp_path, error))?;

    Ok(())
}
