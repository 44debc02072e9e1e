use serde::{Deserialize, Deserializer, Serialize};

/// 考试介绍中的一个段落（后端存储形态）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamInfoSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// 后端返回的考试内容记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub exam_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub linked_course_id: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exam_info_sections: Vec<ExamInfoSection>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ExamContent {
    /// 列表展示用的一行摘要
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {} 个段落{}",
            self.exam_code,
            self.title,
            self.exam_info_sections.len(),
            if self.is_active { "" } else { " | 已停用" }
        )
    }
}

/// 创建 / 更新时提交给后端的请求体
///
/// 媒体地址为空时序列化为 `null`，不省略字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamContentPayload {
    pub exam_code: String,
    pub title: String,
    pub description: String,
    pub linked_course_id: String,
    pub thumbnail_url: Option<String>,
    pub banner_url: Option<String>,
    pub exam_info_sections: Vec<ExamInfoSection>,
}

fn default_true() -> bool {
    true
}

// 后端可能对字符串 / 数组字段返回 null，按缺省值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
