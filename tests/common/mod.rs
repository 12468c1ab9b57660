#![allow(dead_code)]

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use xwalk_corelib::Layout;

pub fn write(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Writes a zip archive at `path` holding `entries` as (name, contents) pairs.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }

    zip.finish().unwrap();
}

pub struct Fixture {
    pub root: tempfile::TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Fixture {
    pub fn library(&self) -> PathBuf {
        self.target.join("xwalk_core_library")
    }
}

/// Lays out a source checkout and a `out/<mode>` directory with every input the default
/// [`Layout`] expects.
pub fn fixture(mode: &str) -> Fixture {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("src");
    let target = root.path().join("out").join(mode);
    let layout = Layout::default();

    for file in &layout.project_files {
        write(
            &source.join(&layout.template_dir).join(file),
            format!("template {}", file).as_bytes(),
        );
    }
    for js in &layout.js_bindings {
        write(&source.join(js), b"// js api");
    }

    for zip_name in &layout.resource_zips {
        let strings = format!("<resources><!-- {} --></resources>", zip_name);
        write_zip(
            &target.join("res.java").join(zip_name),
            &[("values/strings.xml", strings.as_bytes())],
        );
    }
    write_zip(
        &target.join("res.java").join("ui_java.zip"),
        &[
            ("values/strings.xml", b"<resources><!-- ui_java --></resources>"),
            ("drawable-mdpi/ic_menu.png", b"menu png"),
            ("drawable-ldrtl-mdpi-v17/ic_back.png", b"back png"),
            ("layout/menu.xml", b"<LinearLayout/>"),
        ],
    );

    for pak in &layout.paks {
        write(&target.join(pak), pak.as_bytes());
    }
    for jar in &layout.jars {
        write(&target.join("lib.java").join(jar), b"jar");
    }

    let native = target.join(&layout.shell_apk).join("libs").join("armeabi-v7a");
    write(&native.join("libxwalkcore.so"), b"elf");
    write(&native.join("gdbserver"), b"gdbserver");
    write(&native.join("gdb.setup"), b"setup");

    Fixture {
        root,
        source,
        target,
    }
}
