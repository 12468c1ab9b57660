use crate::{
    config::Layout,
    errors::{FileOperation, IoError},
    utils::{copy_named_files, copy_tree, ensure_dir, CopyError},
};
use colored::Colorize;
use miette::Diagnostic;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BinaryError {
    #[error("I/O error within binary domain")]
    #[diagnostic(code(xwalk_corelib::binaries::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Copy(#[from] CopyError),

    #[error("Unable to write the resource list document")]
    #[diagnostic(code(xwalk_corelib::binaries::xml))]
    Xml(#[from] quick_xml::Error),
}

/// Renders the `<resources><string-array name="...">` document listing `paks` in order.
pub fn resources_list_xml<S: AsRef<str>>(list_name: &str, paks: &[S]) -> Result<String, BinaryError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("resources")))?;

    let mut string_array = BytesStart::new("string-array");
    string_array.push_attribute(("name", list_name));
    writer.write_event(Event::Start(string_array))?;

    for pak in paks {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        writer.write_event(Event::Text(BytesText::new(pak.as_ref())))?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("string-array")))?;
    writer.write_event(Event::End(BytesEnd::new("resources")))?;

    let mut document = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    document.push('\n');

    Ok(document)
}

/// Copies paks, jars and native libraries into the library project and writes the pak list.
///
/// ```text
/// <out>/<pak>                        -> <library>/res/raw/<pak>
/// <out>/lib.java/<jar>               -> <library>/libs/<jar>
/// <out>/<shell apk>/libs/**          -> <library>/libs/**
/// ```
pub fn copy_binaries(out_dir: &Path, layout: &Layout) -> Result<(), BinaryError> {
    println!("{}", "Copying binaries...".bright_blue());

    let library_dir = out_dir.join(&layout.library_name);
    let res_raw_dir = library_dir.join("res").join("raw");
    let res_values_dir = library_dir.join("res").join("values");
    ensure_dir(&res_raw_dir)?;
    ensure_dir(&res_values_dir)?;

    copy_named_files(&layout.paks, out_dir, &res_raw_dir)?;

    let list_path = res_values_dir.join(format!("{}.xml", layout.resources_list));
    let document = resources_list_xml(&layout.resources_list, &layout.paks)?;
    fs::write(&list_path, document)
        .map_err(|error| IoError::new(FileOperation::Write, list_path.clone(), error))?;
    log::debug!("wrote {}", list_path.display());

    let libs_dir = library_dir.join("libs");
    ensure_dir(&libs_dir)?;

    copy_named_files(&layout.jars, &out_dir.join("lib.java"), &libs_dir)?;

    copy_tree(&out_dir.join(&layout.shell_apk).join("libs"), &libs_dir)?;

    Ok(())
}
