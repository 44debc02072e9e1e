//! 考试内容编辑会话 - 流程层
//!
//! 核心职责：持有一份草稿，承接本地修改，并在保存时决定新建还是更新
//!
//! 流程顺序：
//! 1. 打开会话 → 默认草稿（edit 模式下再用后端记录覆盖）
//! 2. 本地修改（字段 / 段落）
//! 3. 保存：校验 → 决定目标 → 构建请求体 → 提交 → 提示并跳转

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use crate::clients::ContentClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, EditorError, NavigationError};
use crate::models::{EditScript, EditorMode, ExamContentPayload, NavigationContext};
use crate::services::ContentGateway;
use crate::utils::logging::{log_payload, truncate_text};
use crate::workflow::draft::{Draft, DraftField, SectionField};
use crate::workflow::save_target::{target_code, SaveTarget};
use crate::workflow::ui::{EditorUi, Notice};

/// 新段落输入框中的内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionInput {
    pub header: String,
    pub content: String,
}

#[derive(Debug)]
struct EditorState {
    draft: Draft,
    section_input: SectionInput,
    /// 每次本地修改草稿时递增
    revision: u64,
}

/// 考试内容编辑会话
///
/// - 草稿只有一份，锁只在同步修改期间持有，不跨越 `.await`
/// - 同一会话同时最多只有一个保存请求
/// - edit 模式下，若用户已经开始修改，迟到的后端记录不会覆盖草稿
pub struct EditorSession {
    nav: NavigationContext,
    client: ContentClient,
    ui: Arc<dyn EditorUi>,
    listing_destination: String,
    default_linked_course_id: String,
    state: Mutex<EditorState>,
    saving: AtomicBool,
}

impl EditorSession {
    /// 创建会话，草稿为默认值
    pub fn new(
        nav: NavigationContext,
        config: &Config,
        client: ContentClient,
        ui: Arc<dyn EditorUi>,
    ) -> Self {
        if let Err(e) = nav.mode() {
            warn!("⚠️ {}，按新建模式打开页面", e);
        }

        let draft = Draft::with_defaults(&nav, &config.default_linked_course_id);
        let session = Self {
            nav,
            client,
            ui,
            listing_destination: config.listing_destination.clone(),
            default_linked_course_id: config.default_linked_course_id.clone(),
            state: Mutex::new(EditorState {
                draft,
                section_input: SectionInput::default(),
                revision: 0,
            }),
            saving: AtomicBool::new(false),
        };

        info!("🔍 {}", session.debug_info());
        session
    }

    /// 创建会话，edit 模式下随即用后端记录覆盖草稿
    pub async fn open(
        nav: NavigationContext,
        config: &Config,
        client: ContentClient,
        ui: Arc<dyn EditorUi>,
    ) -> Self {
        let session = Self::new(nav, config, client, ui);
        if session.mode() == Some(EditorMode::Edit) {
            session.hydrate().await;
        }
        session
    }

    /// 有效的编辑模式，action 无法识别时为 `None`
    pub fn mode(&self) -> Option<EditorMode> {
        self.nav.mode().ok()
    }

    /// 当前草稿的快照
    pub fn draft(&self) -> Draft {
        self.state().draft.clone()
    }

    pub fn section_input(&self) -> SectionInput {
        self.state().section_input.clone()
    }

    /// 调试信息：action、考试编码与模式
    pub fn debug_info(&self) -> String {
        format!(
            "Action: {}, Exam Code: {}, Mode: {}",
            self.nav.action(),
            self.nav.exam_code(),
            if self.mode() == Some(EditorMode::Edit) {
                "EDIT"
            } else {
                "ADD"
            }
        )
    }

    /// 从后端获取记录并覆盖草稿
    ///
    /// 失败或记录不存在时草稿保持默认值，只记录日志；返回是否覆盖了草稿
    pub async fn hydrate(&self) -> bool {
        let code = self.nav.exam_code().to_string();
        let revision = self.state().revision;
        let gateway = ContentGateway::new(self.client.clone());

        let record = match gateway.fetch_by_code(&code).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!("⚠️ 未找到考试内容 {}，保持默认草稿", code);
                return false;
            }
            Err(e) => {
                error!("❌ 获取考试内容失败，保持默认草稿: {}", e);
                return false;
            }
        };

        let mut state = self.state();
        if state.revision != revision {
            warn!("⚠️ 草稿在加载期间已被修改，丢弃后端返回的 {}", code);
            return false;
        }

        state.draft = Draft::from_record(record, &self.nav, &self.default_linked_course_id);
        info!(
            "✓ 草稿已加载: {} ({} 个段落)",
            state.draft.exam_code(),
            state.draft.sections().len()
        );
        true
    }

    pub fn update_field(&self, field: DraftField, value: impl Into<String>) {
        let mut state = self.state();
        state.draft.update_field(field, value);
        state.revision += 1;
    }

    /// 设置新段落输入框
    pub fn set_section_input(&self, header: impl Into<String>, content: impl Into<String>) {
        let mut state = self.state();
        state.section_input = SectionInput {
            header: header.into(),
            content: content.into(),
        };
    }

    /// 用输入框内容追加段落，成功后清空输入框
    pub fn add_section(&self) -> Option<String> {
        let mut state = self.state();
        let SectionInput { header, content } = state.section_input.clone();
        let id = state.draft.add_section(&header, &content)?;
        state.section_input = SectionInput::default();
        state.revision += 1;
        debug!("新增段落 {}: {}", id, truncate_text(&header, 40));
        Some(id)
    }

    pub fn remove_section(&self, id: &str) -> bool {
        let mut state = self.state();
        let removed = state.draft.remove_section(id);
        if removed {
            state.revision += 1;
        }
        removed
    }

    pub fn update_section_field(
        &self,
        id: &str,
        field: SectionField,
        value: impl Into<String>,
    ) -> bool {
        let mut state = self.state();
        let updated = state.draft.update_section_field(id, field, value);
        if updated {
            state.revision += 1;
        }
        updated
    }

    /// 按顺序应用编辑脚本
    ///
    /// 字段名全部合法后才开始修改草稿
    pub fn apply_script(&self, script: &EditScript) -> AppResult<()> {
        let fields = script
            .fields
            .iter()
            .map(|(name, value)| -> AppResult<(DraftField, String)> {
                Ok((name.parse::<DraftField>()?, value.clone()))
            })
            .collect::<AppResult<Vec<_>>>()?;

        if script.clear_sections {
            let ids: Vec<String> = self.draft().sections().iter().map(|s| s.id.clone()).collect();
            for id in &ids {
                self.remove_section(id);
            }
            debug!("已清空 {} 个原有段落", ids.len());
        }

        for (field, value) in fields {
            self.update_field(field, value);
        }

        for id in &script.remove_sections {
            if !self.remove_section(id) {
                warn!("⚠️ 段落 {} 不存在，跳过删除", id);
            }
        }

        for update in &script.update_sections {
            let mut found = true;
            if let Some(header) = &update.header {
                found &= self.update_section_field(&update.id, SectionField::Header, header.clone());
            }
            if let Some(content) = &update.content {
                found &= self.update_section_field(&update.id, SectionField::Content, content.clone());
            }
            if !found {
                warn!("⚠️ 段落 {} 不存在，跳过修改", update.id);
            }
        }

        for section in &script.add_sections {
            self.set_section_input(section.header.clone(), section.content.clone());
            if self.add_section().is_none() {
                warn!("⚠️ 跳过空段落");
            }
        }

        Ok(())
    }

    /// 保存草稿
    ///
    /// 任何失败都会提示用户并返回错误，草稿保持不变，可修改后重试
    pub async fn save(&self) -> AppResult<SaveTarget> {
        let Some(_guard) = SaveGuard::acquire(&self.saving) else {
            warn!("⚠️ 上一次保存尚未完成，忽略本次保存");
            let err = AppError::from(EditorError::SaveInFlight);
            self.report(&err);
            return Err(err);
        };

        let (target, payload) = match self.prepare_save() {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!("⚠️ 保存前检查未通过: {}", e);
                self.report(&e);
                return Err(e);
            }
        };

        info!("📤 正在保存考试内容: {}", target);
        log_payload(&payload);

        let result = match &target {
            SaveTarget::Create => self.client.create_record(&payload).await,
            SaveTarget::Update { code } => self.client.update_record(code, &payload).await,
        };

        match result {
            Ok(body) => {
                info!("✅ 保存成功: {}", target);
                debug!("响应: {}", body);
                self.ui.notify(&Notice::Saved);
                self.ui.navigate(&self.listing_destination);
                Ok(target)
            }
            Err(e) => {
                error!("❌ 保存失败 ({}): {}", target, e);
                self.report(&e);
                Err(e)
            }
        }
    }

    /// 校验草稿并确定保存目标与请求体
    fn prepare_save(&self) -> AppResult<(SaveTarget, ExamContentPayload)> {
        let state = self.state();
        state.draft.validate()?;

        let code = target_code(state.draft.exam_code(), self.nav.exam_code()).to_string();
        let mode = self.nav.mode().map_err(|e| match e {
            NavigationError::UnrecognizedAction { action } => {
                AppError::from(EditorError::UnexpectedMode { action })
            }
            other => AppError::from(other),
        })?;

        let target = SaveTarget::resolve(mode, &code);
        let payload = state.draft.to_payload(&code);
        Ok((target, payload))
    }

    fn report(&self, error: &AppError) {
        let notice = match error {
            AppError::Validation(e) => Notice::ValidationFailed(*e),
            AppError::Editor(EditorError::UnexpectedMode { action }) => Notice::UnexpectedMode {
                action: action.clone(),
            },
            AppError::Editor(EditorError::SaveInFlight) => Notice::SaveInFlight,
            other => Notice::SaveFailed {
                message: other.user_message(),
            },
        };
        self.ui.notify(&notice);
    }

    fn state(&self) -> MutexGuard<'_, EditorState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 保存中标记，离开作用域时自动清除
struct SaveGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SaveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
