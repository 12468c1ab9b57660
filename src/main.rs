use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, Command};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .help("Source directory of project root")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .help("Product out target directory")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file overriding the library project layout")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let source = matches
        .get_one::<PathBuf>("source")
        .expect("source required");
    let target = matches
        .get_one::<PathBuf>("target")
        .expect("target required");
    let config = matches.get_one::<PathBuf>("config");

    let layout = xwalk_corelib::load_layout(config.map(PathBuf::as_path))?;

    xwalk_corelib::generate_library_project(source, target, &layout)?;

    Ok(())
}
