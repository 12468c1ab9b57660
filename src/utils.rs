use crate::errors::{FileOperation, IoError, MissingInput};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            // For normal components, push them
            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// Build mode of a product out directory, i.e. its last path component (`Release`, `Debug`).
pub fn build_mode(out_dir: &Path) -> Option<String> {
    normalize_path(out_dir)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Creates `path` and its parents. Returns `true` if the directory did not exist before.
pub fn ensure_dir(path: &Path) -> Result<bool, IoError> {
    if path.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    Ok(true)
}

pub fn copy_file(source: &Path, destination: &Path) -> Result<(), IoError> {
    log::debug!("copy {} -> {}", source.display(), destination.display());

    fs::copy(source, destination)
        .map_err(|error| IoError::new(FileOperation::Copy, source.to_path_buf(), error))?;

    Ok(())
}

/// Copies every named file from `source_dir` into `destination_dir`, keeping the file names.
///
/// Each source must exist; nothing is copied past the first missing one.
pub fn copy_named_files<S: AsRef<str>>(
    names: &[S],
    source_dir: &Path,
    destination_dir: &Path,
) -> Result<(), CopyError> {
    for name in names {
        let source = source_dir.join(name.as_ref());
        if !source.is_file() {
            return Err(MissingInput { path: source }.into());
        }

        let file_name = source.file_name().unwrap_or_default();
        copy_file(&source, &destination_dir.join(file_name))?;
    }

    Ok(())
}

/// Recursively merges the tree at `source` into `destination`, overwriting files that exist.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<(), CopyError> {
    if !source.is_dir() {
        return Err(MissingInput {
            path: source.to_path_buf(),
        }
        .into());
    }

    for entry in walkdir::WalkDir::new(source) {
        let entry = entry.map_err(IoError::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| Path::new(""));
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Removes every entry inside `dir`, leaving `dir` itself in place.
pub fn clear_dir(dir: &Path) -> Result<(), IoError> {
    if !dir.is_dir() {
        return Ok(());
    }

    let entries =
        fs::read_dir(dir).map_err(|error| IoError::new(FileOperation::ReadDir, dir.into(), error))?;

    for entry in entries {
        let path = entry
            .map_err(|error| IoError::new(FileOperation::ReadDir, dir.into(), error))?
            .path();

        if path.is_dir() {
            fs::remove_dir_all(&path)
                .map_err(|error| IoError::new(FileOperation::Rmdir, path.clone(), error))?;
        } else {
            fs::remove_file(&path)
                .map_err(|error| IoError::new(FileOperation::Remove, path.clone(), error))?;
        }
    }

    Ok(())
}

pub fn remove_dir_if_exists(dir: &Path) -> Result<(), IoError> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .map_err(|error| IoError::new(FileOperation::Rmdir, dir.to_path_buf(), error))?;
    }

    Ok(())
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum CopyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Missing(#[from] MissingInput),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_mode_ignores_trailing_markers() {
        assert_eq!(build_mode(Path::new("out/Release/")).as_deref(), Some("Release"));
        assert_eq!(build_mode(Path::new("out/Release/.")).as_deref(), Some("Release"));
        assert_eq!(build_mode(Path::new("out/Release/lib/..")).as_deref(), Some("Release"));
        assert_eq!(build_mode(Path::new("out/Debug")).as_deref(), Some("Debug"));
    }

    #[test]
    fn normalize_path_drops_current_dir() {
        assert_eq!(normalize_path(Path::new("./a/./b")), PathBuf::from("a/b"));
    }
}
