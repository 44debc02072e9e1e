use std::fmt;

use crate::clients::ContentClient;
use crate::models::EditorMode;

/// 保存时的目标：新建走集合路径，更新走单条记录路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update { code: String },
}

impl SaveTarget {
    pub fn resolve(mode: EditorMode, code: &str) -> Self {
        match mode {
            EditorMode::Add => SaveTarget::Create,
            EditorMode::Edit => SaveTarget::Update {
                code: code.to_string(),
            },
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            SaveTarget::Create => "POST",
            SaveTarget::Update { .. } => "PUT",
        }
    }

    pub fn path(&self) -> String {
        match self {
            SaveTarget::Create => ContentClient::collection_path(),
            SaveTarget::Update { code } => ContentClient::record_path(code),
        }
    }
}

impl fmt::Display for SaveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// 保存使用的考试编码：草稿中的编码优先，为空时用导航给出的编码
pub fn target_code<'a>(draft_code: &'a str, nav_code: &'a str) -> &'a str {
    if draft_code.is_empty() {
        nav_code
    } else {
        draft_code
    }
}
