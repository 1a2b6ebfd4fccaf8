// ==========================================
// 赛事管理系统 - 批量导入命令行入口
// ==========================================
// 用法: cricket-import <entity> <file> [--dry-run] [--json]
// 实体: players / food / committee
// Ctrl-C: 当前批次完成后停止，剩余记录不再提交
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use cricket_import::api::{CredentialProvider, EnvTokenProvider, HttpImportEndpoint, StaticToken};
use cricket_import::importer::ProgressCallback;
use cricket_import::{logging, EntityKind, ImportPipeline, ImportResult, ImportSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "cricket-import")]
#[command(about = "批量导入球员 / 餐食登记 / 委员会成员")]
#[command(version)]
struct Args {
    /// 导入实体: players | food | committee
    entity: EntityKind,

    /// 待导入文件 (.csv / .xlsx / .xls)
    file: PathBuf,

    /// 配置文件路径（默认: 用户配置目录下 cricket-import/config.toml）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖 API 根地址
    #[arg(long)]
    api_base_url: Option<String>,

    /// 覆盖批次大小
    #[arg(long)]
    batch_size: Option<usize>,

    /// Bearer Token（默认读取 CRICKET_IMPORT_TOKEN）
    #[arg(long)]
    token: Option<String>,

    /// 只解码与映射，输出规范记录，不提交
    #[arg(long)]
    dry_run: bool,

    /// 以 JSON 输出结果与日志
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.json {
        logging::init_json();
    } else {
        logging::init();
    }

    info!("{} v{}", cricket_import::APP_NAME, cricket_import::VERSION);

    let mut settings =
        ImportSettings::load(args.config.as_deref()).context("无法加载导入配置")?;
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(size) = args.batch_size {
        settings.batch_size = size;
    }
    settings.validate().context("导入配置无效")?;

    let credentials: Arc<dyn CredentialProvider> = match args.token {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(EnvTokenProvider::default()),
    };
    let endpoint =
        HttpImportEndpoint::new(&settings, credentials).context("无法创建 HTTP 客户端")?;

    if args.dry_run {
        let mapped = ImportPipeline::new(&endpoint, &settings)
            .map_file(args.entity, &args.file)
            .await
            .with_context(|| format!("无法读取文件: {}", args.file.display()))?;

        info!(
            records = mapped.records.len(),
            dropped = mapped.dropped_rows.len(),
            "dry-run 完成，未提交任何记录"
        );
        println!("{}", serde_json::to_string_pretty(&mapped.records)?);
        return Ok(());
    }

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到中断信号，当前批次完成后停止");
            signal_token.cancel();
        }
    });

    let progress = ProgressCallback(|percent: u8| info!(percent = percent, "导入进度"));
    let result = ImportPipeline::new(&endpoint, &settings)
        .with_observer(&progress)
        .with_cancellation(cancel_token)
        .run_file(args.entity, &args.file)
        .await
        .with_context(|| format!("导入失败: {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, settings.max_reported_errors);
    }

    Ok(())
}

fn print_summary(result: &ImportResult, max_errors: usize) {
    println!("{}", result);

    if result.errors.is_empty() {
        return;
    }

    println!("错误明细:");
    for message in result.error_messages(max_errors) {
        println!("  - {}", message);
    }
    if result.errors.len() > max_errors {
        println!("  ... 另有 {} 条未显示", result.errors.len() - max_errors);
    }
}
