use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exam_content_admin::utils::logging;
use exam_content_admin::{App, Config};

#[derive(Parser)]
#[command(name = "exam_content_admin")]
#[command(about = "考试内容管理：查看、新建、编辑考试介绍")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出全部考试内容
    List,
    /// 按编码查看考试内容
    Show {
        /// 考试编码，如 ssc-cgl
        code: String,
    },
    /// 打开编辑页地址（如 /admin/exam/ssc-cgl?action=edit）并保存
    Edit {
        page: String,
        /// 编辑脚本（TOML）
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// 按考试名称新建
    New {
        /// 考试名称，如 "SSC CGL"
        name: String,
        /// 编辑脚本（TOML）
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let app = App::initialize(config)?;

    match cli.command {
        Command::List => {
            app.list().await?;
        }
        Command::Show { code } => match app.show(&code).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("考试内容不存在: {}", code),
        },
        Command::Edit { page, script } => {
            app.edit(&page, script.as_deref()).await?;
        }
        Command::New { name, script } => {
            app.create(&name, script.as_deref()).await?;
        }
    }

    Ok(())
}
