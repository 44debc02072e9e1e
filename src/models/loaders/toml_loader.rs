use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::error::{AppError, AppResult, FileError};

/// 编辑脚本：按顺序应用到草稿上的本地修改
///
/// ```toml
/// clear_sections = true
/// remove_sections = ["1f0c..."]
///
/// [fields]
/// title = "SSC CGL 2025"
/// thumbnail_url = ""
///
/// [[update_sections]]
/// id = "1f0c..."
/// content = "Tier 1 only"
///
/// [[add_sections]]
/// header = "Eligibility"
/// content = "Graduate"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditScript {
    /// 顶层字段修改，键为字段名
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// 移除脚本执行前草稿中的全部段落（edit 模式下包括后端已有的段落）
    #[serde(default)]
    pub clear_sections: bool,
    #[serde(default)]
    pub remove_sections: Vec<String>,
    #[serde(default)]
    pub update_sections: Vec<SectionUpdate>,
    #[serde(default)]
    pub add_sections: Vec<NewSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionUpdate {
    pub id: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSection {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub content: String,
}

impl EditScript {
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// 从 TOML 文件加载编辑脚本
pub async fn load_edit_script(path: &Path) -> AppResult<EditScript> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let script: EditScript = toml::from_str(&content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    })?;

    tracing::info!(
        "已加载编辑脚本 {}: {} 个字段修改, 新增 {} 个段落",
        path.display(),
        script.fields.len(),
        script.add_sections.len()
    );

    Ok(script)
}
