use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::clients::ContentClient;
use crate::config::Config;
use crate::models::{load_edit_script, EditScript, ExamContent, NavigationContext};
use crate::services::ContentGateway;
use crate::utils::logging::{log_records, log_startup};
use crate::workflow::{ConsoleUi, EditorSession, SaveTarget};

/// 应用主结构
#[derive(Debug)]
pub struct App {
    config: Config,
    client: ContentClient,
    gateway: ContentGateway,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = ContentClient::new(&config).context("无法创建 HTTP 客户端")?;
        let gateway = ContentGateway::new(client.clone());

        Ok(Self {
            config,
            client,
            gateway,
        })
    }

    /// 列出全部考试内容
    pub async fn list(&self) -> Result<Vec<ExamContent>> {
        let records = self
            .gateway
            .fetch_all()
            .await
            .context("获取考试内容列表失败")?;
        log_records(&records);
        Ok(records)
    }

    /// 查看单条考试内容
    pub async fn show(&self, code: &str) -> Result<Option<ExamContent>> {
        let record = self
            .gateway
            .fetch_by_code(code)
            .await
            .with_context(|| format!("获取考试内容失败: {}", code))?;
        if record.is_none() {
            warn!("⚠️ 考试内容 {} 不存在", code);
        }
        Ok(record)
    }

    /// 打开编辑页地址对应的会话，应用脚本后保存
    pub async fn edit(&self, page: &str, script: Option<&Path>) -> Result<SaveTarget> {
        let nav = NavigationContext::parse(page)?;
        self.run_session(nav, script).await
    }

    /// 按考试名称新建
    pub async fn create(&self, name: &str, script: Option<&Path>) -> Result<SaveTarget> {
        let nav = NavigationContext::for_new_exam(name);
        if nav.exam_code().is_empty() {
            anyhow::bail!("无法从名称生成考试编码: {}", name);
        }
        self.run_session(nav, script).await
    }

    async fn run_session(
        &self,
        nav: NavigationContext,
        script: Option<&Path>,
    ) -> Result<SaveTarget> {
        // 先读脚本，避免脚本有误时白白请求后端
        let script = match script {
            Some(path) => load_edit_script(path).await?,
            None => EditScript::default(),
        };

        let ui = Arc::new(ConsoleUi::new());
        let session = EditorSession::open(nav, &self.config, self.client.clone(), ui.clone()).await;

        if !script.is_empty() {
            session.apply_script(&script).context("应用编辑脚本失败")?;
        }

        let target = session.save().await?;
        if let Some(destination) = ui.destination() {
            info!("✓ 已完成，返回 {}", destination);
        }
        Ok(target)
    }
}
