pub mod toml_loader;

pub use toml_loader::{load_edit_script, EditScript, NewSection, SectionUpdate};
