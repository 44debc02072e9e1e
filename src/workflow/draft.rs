//! 考试内容草稿
//!
//! 编辑会话中唯一的一份可变记录，所有本地修改都经过这里

use std::str::FromStr;

use uuid::Uuid;

use crate::error::{FileError, ValidationError};
use crate::models::{ExamContent, ExamContentPayload, ExamInfoSection, NavigationContext};

/// 新建草稿时预置的示例段落
pub const SAMPLE_SECTIONS: [(&str, &str); 2] = [
    ("Syllabus", "Maths, Reasoning, GK, English..."),
    ("Exam Pattern", "Tier 1, Tier 2, descriptive etc..."),
];

/// 草稿中的段落
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSection {
    pub id: String,
    pub header: String,
    pub content: String,
}

impl DraftSection {
    fn new(header: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            header: header.into(),
            content: content.into(),
        }
    }
}

/// 可编辑的顶层字段
///
/// 考试编码不在其中：一个编辑会话内它不允许被用户修改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Description,
    LinkedCourseId,
    ThumbnailUrl,
    BannerUrl,
}

impl FromStr for DraftField {
    type Err = FileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(DraftField::Title),
            "description" => Ok(DraftField::Description),
            "linked_course_id" => Ok(DraftField::LinkedCourseId),
            "thumbnail_url" => Ok(DraftField::ThumbnailUrl),
            "banner_url" => Ok(DraftField::BannerUrl),
            other => Err(FileError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

/// 段落中可编辑的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Header,
    Content,
}

/// 考试内容草稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    exam_code: String,
    title: String,
    description: String,
    linked_course_id: String,
    thumbnail_url: Option<String>,
    banner_url: Option<String>,
    sections: Vec<DraftSection>,
}

impl Draft {
    /// 按导航上下文生成默认草稿（含两个示例段落）
    pub fn with_defaults(nav: &NavigationContext, default_linked_course_id: &str) -> Self {
        Self {
            exam_code: nav.exam_code().to_string(),
            title: nav.display_name(),
            description: String::new(),
            linked_course_id: default_linked_course_id.to_string(),
            thumbnail_url: None,
            banner_url: None,
            sections: SAMPLE_SECTIONS
                .iter()
                .map(|(header, content)| DraftSection::new(*header, *content))
                .collect(),
        }
    }

    /// 用后端记录生成草稿，缺失的字段回退到导航上下文或默认值
    pub fn from_record(
        record: ExamContent,
        nav: &NavigationContext,
        default_linked_course_id: &str,
    ) -> Self {
        Self {
            exam_code: non_empty(record.exam_code).unwrap_or_else(|| nav.exam_code().to_string()),
            title: non_empty(record.title).unwrap_or_else(|| nav.display_name()),
            description: record.description,
            linked_course_id: record
                .linked_course_id
                .and_then(non_empty)
                .unwrap_or_else(|| default_linked_course_id.to_string()),
            thumbnail_url: record.thumbnail_url.and_then(non_empty),
            banner_url: record.banner_url.and_then(non_empty),
            sections: record
                .exam_info_sections
                .into_iter()
                .map(|s| DraftSection {
                    id: non_empty(s.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
                    header: s.header,
                    content: s.content,
                })
                .collect(),
        }
    }

    pub fn exam_code(&self) -> &str {
        &self.exam_code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn linked_course_id(&self) -> &str {
        &self.linked_course_id
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn banner_url(&self) -> Option<&str> {
        self.banner_url.as_deref()
    }

    pub fn sections(&self) -> &[DraftSection] {
        &self.sections
    }

    /// 替换一个顶层字段，不做校验；媒体地址为空时置为 `None`
    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::LinkedCourseId => self.linked_course_id = value,
            DraftField::ThumbnailUrl => self.thumbnail_url = non_empty(value),
            DraftField::BannerUrl => self.banner_url = non_empty(value),
        }
    }

    /// 追加段落，标题和内容都为空白时不做任何事
    ///
    /// 返回新段落的 ID
    pub fn add_section(&mut self, header: &str, content: &str) -> Option<String> {
        let header = header.trim();
        let content = content.trim();
        if header.is_empty() && content.is_empty() {
            return None;
        }

        let section = DraftSection::new(header, content);
        let id = section.id.clone();
        self.sections.push(section);
        Some(id)
    }

    /// 按 ID 移除段落，返回是否找到
    pub fn remove_section(&mut self, id: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        self.sections.len() != before
    }

    /// 修改段落的标题或内容（不裁剪空白），返回是否找到
    pub fn update_section_field(
        &mut self,
        id: &str,
        field: SectionField,
        value: impl Into<String>,
    ) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        match field {
            SectionField::Header => section.header = value.into(),
            SectionField::Content => section.content = value.into(),
        }
        true
    }

    /// 依次校验标题、描述、关联课程，返回第一个失败项
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.linked_course_id.trim().is_empty() {
            return Err(ValidationError::MissingLinkedCourseId);
        }
        Ok(())
    }

    /// 构建提交给后端的请求体
    ///
    /// 段落的 `order` 固定为 0，`is_active` 固定为 true
    pub fn to_payload(&self, exam_code: &str) -> ExamContentPayload {
        ExamContentPayload {
            exam_code: exam_code.to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            linked_course_id: self.linked_course_id.trim().to_string(),
            thumbnail_url: self.thumbnail_url.clone(),
            banner_url: self.banner_url.clone(),
            exam_info_sections: self
                .sections
                .iter()
                .map(|s| ExamInfoSection {
                    id: s.id.clone(),
                    header: s.header.trim().to_string(),
                    content: s.content.trim().to_string(),
                    order: 0,
                    is_active: true,
                })
                .collect(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> NavigationContext {
        NavigationContext::new(Some("ssc-cgl"), Some("add"))
    }

    fn blank_draft() -> Draft {
        let mut draft = Draft::with_defaults(&nav(), "course-1");
        draft.sections.clear();
        draft
    }

    fn record(value: serde_json::Value) -> ExamContent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn defaults_follow_navigation_context() {
        let draft = Draft::with_defaults(&nav(), "dummy-course-id");
        assert_eq!(draft.exam_code(), "ssc-cgl");
        assert_eq!(draft.title(), "ssc cgl");
        assert_eq!(draft.description(), "");
        assert_eq!(draft.linked_course_id(), "dummy-course-id");
        assert_eq!(draft.thumbnail_url(), None);
        assert_eq!(draft.sections().len(), 2);
        assert_eq!(draft.sections()[0].header, "Syllabus");
        assert_eq!(draft.sections()[1].header, "Exam Pattern");
        assert_ne!(draft.sections()[0].id, draft.sections()[1].id);
    }

    #[test]
    fn add_section_ignores_blank_input() {
        let mut draft = blank_draft();
        assert_eq!(draft.add_section("", ""), None);
        assert_eq!(draft.add_section("   ", "\n\t"), None);
        assert!(draft.sections().is_empty());
    }

    #[test]
    fn add_section_accepts_either_field() {
        let mut draft = blank_draft();
        draft.add_section("H", "").unwrap();
        draft.add_section("", "C").unwrap();

        assert_eq!(draft.sections().len(), 2);
        assert_eq!(draft.sections()[0].header, "H");
        assert_eq!(draft.sections()[0].content, "");
        assert_eq!(draft.sections()[1].header, "");
        assert_eq!(draft.sections()[1].content, "C");
    }

    #[test]
    fn add_section_trims_and_appends_in_order() {
        let mut draft = Draft::with_defaults(&nav(), "course-1");
        let id = draft.add_section("  Eligibility ", " Graduate  ").unwrap();

        let last = draft.sections().last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.header, "Eligibility");
        assert_eq!(last.content, "Graduate");
        assert_eq!(draft.sections().len(), 3);
    }

    #[test]
    fn remove_unknown_section_is_noop() {
        let mut draft = Draft::with_defaults(&nav(), "course-1");
        let before = draft.sections().to_vec();
        assert!(!draft.remove_section("missing"));
        assert_eq!(draft.sections(), before.as_slice());
    }

    #[test]
    fn remove_section_by_id() {
        let mut draft = Draft::with_defaults(&nav(), "course-1");
        let first = draft.sections()[0].id.clone();
        assert!(draft.remove_section(&first));
        assert_eq!(draft.sections().len(), 1);
        assert_eq!(draft.sections()[0].header, "Exam Pattern");
    }

    #[test]
    fn update_section_field_keeps_raw_value() {
        let mut draft = Draft::with_defaults(&nav(), "course-1");
        let id = draft.sections()[1].id.clone();
        assert!(draft.update_section_field(&id, SectionField::Content, " Tier 1 "));
        assert_eq!(draft.sections()[1].content, " Tier 1 ");
        assert!(!draft.update_section_field("missing", SectionField::Header, "x"));
    }

    #[test]
    fn media_urls_normalize_empty_to_none() {
        let mut draft = blank_draft();
        draft.update_field(DraftField::ThumbnailUrl, "https://cdn.example.com/t.png");
        assert_eq!(draft.thumbnail_url(), Some("https://cdn.example.com/t.png"));
        draft.update_field(DraftField::ThumbnailUrl, "");
        assert_eq!(draft.thumbnail_url(), None);
        draft.update_field(DraftField::BannerUrl, "");
        assert_eq!(draft.banner_url(), None);
    }

    #[test]
    fn validation_checks_fields_in_order() {
        let mut draft = blank_draft();
        draft.update_field(DraftField::Title, "  ");
        draft.update_field(DraftField::LinkedCourseId, "");
        assert_eq!(draft.validate(), Err(ValidationError::MissingTitle));

        draft.update_field(DraftField::Title, "SSC CGL");
        assert_eq!(draft.validate(), Err(ValidationError::MissingDescription));

        draft.update_field(DraftField::Description, "Staff Selection");
        assert_eq!(draft.validate(), Err(ValidationError::MissingLinkedCourseId));

        draft.update_field(DraftField::LinkedCourseId, "course-1");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn payload_trims_and_flattens_sections() {
        let mut draft = blank_draft();
        draft.update_field(DraftField::Title, " SSC CGL ");
        draft.update_field(DraftField::Description, "Staff Selection\n");
        draft.update_field(DraftField::LinkedCourseId, " course-1");
        let id = draft.add_section("Syllabus", "Maths").unwrap();
        draft.update_section_field(&id, SectionField::Header, "  Syllabus  ");

        let payload = draft.to_payload("ssc-cgl");
        assert_eq!(payload.exam_code, "ssc-cgl");
        assert_eq!(payload.title, "SSC CGL");
        assert_eq!(payload.description, "Staff Selection");
        assert_eq!(payload.linked_course_id, "course-1");
        assert_eq!(payload.exam_info_sections.len(), 1);
        let section = &payload.exam_info_sections[0];
        assert_eq!(section.id, id);
        assert_eq!(section.header, "Syllabus");
        assert_eq!(section.order, 0);
        assert!(section.is_active);
    }

    #[test]
    fn hydration_replaces_fields_and_drops_section_metadata() {
        let draft = Draft::from_record(
            record(serde_json::json!({
                "exam_code": "ssc-cgl",
                "title": "Old",
                "description": "Old description",
                "linked_course_id": "course-9",
                "thumbnail_url": "",
                "banner_url": "https://cdn.example.com/b.png",
                "exam_info_sections": [
                    {"id": "s1", "header": "H", "content": "C", "order": 5, "is_active": false}
                ]
            })),
            &nav(),
            "dummy-course-id",
        );

        assert_eq!(draft.title(), "Old");
        assert_eq!(draft.description(), "Old description");
        assert_eq!(draft.linked_course_id(), "course-9");
        assert_eq!(draft.thumbnail_url(), None);
        assert_eq!(draft.banner_url(), Some("https://cdn.example.com/b.png"));
        assert_eq!(
            draft.sections(),
            &[DraftSection {
                id: "s1".to_string(),
                header: "H".to_string(),
                content: "C".to_string(),
            }]
        );
        assert!(draft.to_payload("ssc-cgl").exam_info_sections[0].is_active);
    }

    #[test]
    fn hydration_falls_back_for_missing_fields() {
        let draft = Draft::from_record(
            record(serde_json::json!({"title": "", "exam_info_sections": [{"header": "H"}]})),
            &nav(),
            "dummy-course-id",
        );

        assert_eq!(draft.exam_code(), "ssc-cgl");
        assert_eq!(draft.title(), "ssc cgl");
        assert_eq!(draft.linked_course_id(), "dummy-course-id");
        assert!(!draft.sections()[0].id.is_empty());
    }

    #[test]
    fn field_names_parse_but_exam_code_does_not() {
        assert_eq!("title".parse::<DraftField>().unwrap(), DraftField::Title);
        assert_eq!(
            "linked_course_id".parse::<DraftField>().unwrap(),
            DraftField::LinkedCourseId
        );
        assert!(matches!(
            "exam_code".parse::<DraftField>(),
            Err(FileError::UnknownField { .. })
        ));
    }
}
