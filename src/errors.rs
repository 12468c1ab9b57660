use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("copying a file")]
    Copy,
    #[error("moving a file")]
    Move,
    #[error("removing a file")]
    Remove,
    #[error("creating a directory")]
    Mkdir,
    #[error("removing a directory")]
    Rmdir,
    #[error("listing a directory")]
    ReadDir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(xwalk_corelib::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}
impl From<walkdir::Error> for IoError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(|p| p.to_path_buf()).unwrap_or_default();

        Self::new(FileOperation::ReadDir, path, error.into())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FileFormat {
    #[error("toml")]
    Toml,
}
#[derive(Debug, Error, Diagnostic)]
#[error("Parsing error: {file_format} on '{path}'")]
#[diagnostic(code(xwalk_corelib::parse), help("Review file"))]
pub struct ParseError {
    pub file_format: FileFormat,
    pub path: std::path::PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn new(file_format: FileFormat, path: std::path::PathBuf, error: toml::de::Error) -> Self {
        Self {
            file_format,
            path,
            source: error,
        }
    }
}

/// Error raised when a file the generator expects to copy is absent.
#[derive(Debug, Error, Diagnostic)]
#[error("Required input not found: '{path}'")]
#[diagnostic(
    code(xwalk_corelib::missing_input),
    help("Make sure the build that produces this file ran before generating the library project.")
)]
pub struct MissingInput {
    pub path: std::path::PathBuf,
}
