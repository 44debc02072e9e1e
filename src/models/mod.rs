pub mod exam_content;
pub mod loaders;
pub mod navigation;

pub use exam_content::{ExamContent, ExamContentPayload, ExamInfoSection};
pub use loaders::{load_edit_script, EditScript};
pub use navigation::{slugify, EditorMode, NavigationContext};
