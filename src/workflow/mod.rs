pub mod draft;
pub mod editor;
pub mod save_target;
pub mod ui;

pub use draft::{Draft, DraftField, DraftSection, SectionField};
pub use editor::{EditorSession, SectionInput};
pub use save_target::SaveTarget;
pub use ui::{ConsoleUi, EditorUi, Notice};
