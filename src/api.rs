use crate::{
    binaries::{self, BinaryError},
    config::{ConfigError, Layout},
    project::{self, ProjectError},
    resources::{self, ResourceError},
    utils::build_mode,
};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GeneratorError {
    #[error("Source project does not exist, please provide correct directory: '{path}'")]
    #[diagnostic(
        code(xwalk_corelib::source_not_found),
        help("Pass the checkout root that contains the xwalk/ directory with -s")
    )]
    SourceNotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Binary(#[from] BinaryError),
}

/// Generates the library project under `<target>/<library>` from the source tree at `source`
/// and the build products in `target`. Returns the project directory.
///
/// # Errors
///
/// Returns a [`GeneratorError`] if:
///
/// - `source` does not exist, in which case `target` is left untouched.
/// - A template file, resource zip, pak, jar, native library directory or JS binding is missing.
/// - Two resource zips share a name, or merging would overwrite an existing resource.
/// - A file or directory cannot be read, copied, moved or written.
pub fn generate_library_project(
    source: &Path,
    target: &Path,
    layout: &Layout,
) -> Result<PathBuf, GeneratorError> {
    if !source.exists() {
        return Err(GeneratorError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    println!("{}", "Generating XWalkCore Library Project...".bold());

    let project_dir = target.join(&layout.library_name);

    project::clean_library_project(target, layout)?;
    project::copy_project_files(source, target, layout)?;
    resources::copy_resources(target, layout)?;
    binaries::copy_binaries(target, layout)?;
    project::copy_js_binding_files(source, target, layout)?;
    project::post_copy_library_project(target, layout)?;

    let mode = build_mode(target).unwrap_or_default();
    let removed =
        project::remove_unused_files_in_release_mode(&mode, &project_dir.join("libs"), layout)?;
    log::debug!("build mode '{}', {} unused files removed", mode, removed);

    project::create_src_placeholder(target, layout)?;

    println!(
        "Your Android library project has been created at {}",
        project_dir.display().to_string().green()
    );

    Ok(project_dir)
}

/// Loads the layout from `config` when given, otherwise returns the built-in one.
pub fn load_layout(config: Option<&Path>) -> Result<Layout, GeneratorError> {
    match config {
        Some(path) => {
            log::debug!("loading layout from {}", path.display());
            Ok(Layout::from_file(path)?)
        }
        None => Ok(Layout::default()),
    }
}
