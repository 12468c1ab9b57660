//! Generator for the `xwalk_core_library` Android library project.
//!
//! Given the source checkout and a product out directory (for example `out/Release`), it
//! assembles `<out>/xwalk_core_library` with the project template files, the merged Java
//! resources, the data paks, the jar and native libraries, and an empty `src/` directory.
pub mod api;
pub mod binaries;
pub mod config;
pub mod errors;
pub mod project;
pub mod resources;
pub mod transactions;
pub mod utils;

pub use api::{generate_library_project, load_layout, GeneratorError};
pub use config::Layout;
