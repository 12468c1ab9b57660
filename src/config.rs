use crate::errors::{FileFormat, FileOperation, IoError, ParseError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(xwalk_corelib::config::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Names and locations of everything that goes into the library project.
///
/// The defaults describe the stock `xwalk_core_library` layout. A TOML file passed
/// with `--config` may override any field; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Directory created under the target directory.
    pub library_name: String,
    /// Build product whose `libs/` holds the native libraries.
    pub shell_apk: String,
    /// Template directory, relative to the source root.
    pub template_dir: String,
    pub project_files: Vec<String>,
    /// Archives looked up in `<target>/res.java/`, merged in this order.
    pub resource_zips: Vec<String>,
    pub paks: Vec<String>,
    /// Archives looked up in `<target>/lib.java/`.
    pub jars: Vec<String>,
    /// JS API files, relative to the source root, copied into `res/raw/`.
    pub js_bindings: Vec<String>,
    /// AIDL files, relative to the project `src/`, removed after copying.
    pub stale_aidls: Vec<String>,
    /// File names dropped from `libs/` when building in release mode.
    pub release_excludes: Vec<String>,
    /// `name` attribute of the generated string-array.
    pub resources_list: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            library_name: "xwalk_core_library".into(),
            shell_apk: "xwalk_core_shell_apk".into(),
            template_dir: "xwalk/build/android/xwalkcore_library_template".into(),
            project_files: strings(&[
                "AndroidManifest.xml",
                "project.properties",
                "build.xml",
                "ant.properties",
            ]),
            resource_zips: strings(&[
                "content_java.zip",
                "content_strings_grd.zip",
                "ui_java.zip",
                "ui_strings_grd.zip",
                "xwalk_core_internal_java.zip",
                "xwalk_core_strings.zip",
            ]),
            paks: strings(&["icudtl.dat", "xwalk.pak"]),
            jars: strings(&["xwalk_core_library_java.jar"]),
            js_bindings: strings(&[
                "xwalk/experimental/launch_screen/launch_screen_api.js",
                "xwalk/experimental/presentation/presentation_api.js",
                "xwalk/sysapps/device_capabilities/device_capabilities_api.js",
            ]),
            stale_aidls: strings(&[
                "org/chromium/content/common/common.aidl",
                "org/chromium/net/IRemoteAndroidKeyStoreInterface.aidl",
            ]),
            release_excludes: strings(&["gdbserver", "gdb.setup"]),
            resources_list: "xwalk_resources_list".into(),
        }
    }
}

impl Layout {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::from_toml(&content)
            .map_err(|error| ParseError::new(FileFormat::Toml, path.to_path_buf(), error).into())
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let layout = Layout::from_toml("").unwrap();

        assert_eq!(layout, Layout::default());
    }

    #[test]
    fn overrides_single_field() {
        let layout = Layout::from_toml(r#"paks = ["a.pak"]"#).unwrap();

        assert_eq!(layout.paks, vec!["a.pak".to_string()]);
        assert_eq!(layout.library_name, "xwalk_core_library");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Layout::from_toml("pakz = []").is_err());
    }
}
