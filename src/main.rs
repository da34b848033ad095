use clap::Parser;
use intake::api::{HttpIntakeApi, IntakeApi};
use intake::{cli, config, display, error, health, interactive, notify, selection, session, submission};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use error::{IntakeError, Result};
use health::{HealthProbe, SETTLE_GRACE};
use intake_common::Category;
use notify::{Notifier, TerminalSink};
use selection::SelectedFile;
use session::SessionController;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use submission::SubmitOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "intake=debug" } else { "intake=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            if let Some(message) = e.user_message() {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    // 接続先は起動時に一度だけ決める
    let base_url = config.resolve_base_url(cli.base_url.as_deref(), cli.host.as_deref());
    tracing::debug!(base_url = %base_url, "API base url resolved");

    let notifier = Notifier::new(Arc::new(TerminalSink));

    match cli.command {
        Commands::Process { paths, no_auto_classify, export, output, categories, save_json } => {
            println!("📄 相続税申告書類 - 一括処理\n");

            let api: Arc<dyn IntakeApi> = Arc::new(HttpIntakeApi::new(base_url)?);
            let health = HealthProbe::new(Arc::clone(&api), notifier.clone()).spawn();

            let download_dir = output.unwrap_or_else(|| config.download_dir());
            let options = SubmitOptions {
                auto_classify: config.auto_classify && !no_auto_classify,
            };
            let mut controller = SessionController::new(api, notifier, download_dir, options);

            let result = run_process(&mut controller, &paths, export, &categories, save_json).await;
            health.settle(SETTLE_GRACE).await;
            result?;

            println!("\n✅ 完了");
        }

        Commands::Interactive { output } => {
            println!("📄 相続税申告書類 - 対話モード\n");

            let api: Arc<dyn IntakeApi> = Arc::new(HttpIntakeApi::new(base_url)?);
            let health = HealthProbe::new(Arc::clone(&api), notifier.clone()).spawn();

            let download_dir = output.unwrap_or_else(|| config.download_dir());
            let options = SubmitOptions {
                auto_classify: config.auto_classify,
            };
            let mut controller = SessionController::new(api, notifier, download_dir, options);
            let result = interactive::run_interactive(&mut controller).await;
            health.settle(SETTLE_GRACE).await;
            result?;
        }

        Commands::Health => {
            let api = HttpIntakeApi::new(base_url)?;
            let report = api.health().await?;
            println!("✅ API: {} ({})", report.status, api.base_url());
            if !report.service.is_empty() {
                println!("  サービス: {}", report.service);
            }
        }

        Commands::Config { set_host, set_download_dir, show } => {
            let mut config = config;

            if let Some(host) = set_host {
                config.set_host(host)?;
                println!("✔ ホストを設定しました");
            }

            if let Some(dir) = set_download_dir {
                config.set_download_dir(dir)?;
                println!("✔ 保存先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  ホスト: {}", config.host);
                println!(
                    "  接続先: {}",
                    config.resolve_base_url(cli.base_url.as_deref(), cli.host.as_deref())
                );
                println!("  保存先: {}", config.download_dir().display());
                println!("  自動分類: {}", if config.auto_classify { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

/// 選択 → 送信 → エクスポート（失敗した時点で止める）
async fn run_process(
    controller: &mut SessionController,
    paths: &[PathBuf],
    export: Option<ExportFormat>,
    categories: &[Category],
    save_json: Option<PathBuf>,
) -> Result<()> {
    // 1. 選択
    println!("[1/3] ファイルを選択中...");
    let files = SelectedFile::collect(paths)?;
    println!("✔ {}件のファイルを選択\n", files.len());

    if files.is_empty() {
        return Err(IntakeError::NoFilesSelected);
    }
    controller.replace_files(files);

    // 2. 送信・集計
    println!("[2/3] 書類を処理中...");
    let summary = display::with_spinner("書類を処理中...", controller.submit()).await?;
    if let Some(summary) = summary {
        println!("\n{}", display::render_summary(&summary));
    }

    if let Some(path) = save_json {
        let json = serde_json::to_string_pretty(controller.state().documents())?;
        std::fs::write(&path, json)?;
        println!("✔ 結果を保存: {}", path.display());
    }

    // 3. エクスポート
    if let Some(format) = export {
        println!("[3/3] エクスポート中... ({})", format);
        match format {
            ExportFormat::Csv => {
                if let Some(path) = controller.export_csv(categories).await? {
                    println!("✔ CSV出力: {}", path.display());
                }
            }
            ExportFormat::Pdf => {
                controller.export_pdf().await?;
            }
        }
    }

    Ok(())
}
