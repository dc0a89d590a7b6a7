use anyhow::{anyhow, Context, Result};
use breakout_scanner::config::{self, LogConfig};
use breakout_scanner::data_provider::CsvDataProvider;
use breakout_scanner::domain_types::{BreakoutParams, WindowRequest};
use breakout_scanner::report;
use breakout_scanner::utils::parse_date;
use breakout_scanner::{BreakoutScanner, ScanStatus};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// 成交量與價格突破日掃描
#[derive(Parser, Debug)]
#[command(name = "breakout_scanner", version, about = "Stock breakout analysis")]
struct Cli {
    /// 股票代碼
    #[arg(long, default_value = "AAPL")]
    ticker: String,

    /// 開始日期 (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    start: NaiveDate,

    /// 結束日期 (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    end: NaiveDate,

    /// 成交量門檻 (%)，200 表示成交量為 20 日均量的兩倍
    #[arg(long, value_parser = clap::value_parser!(u32).range(100..=500))]
    volume_threshold: Option<u32>,

    /// 漲幅門檻 (%)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    price_threshold: Option<u32>,

    /// 持有期（交易日）
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    holding_period: Option<u32>,

    /// CSV 日線資料目錄
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 匯出突破日 CSV
    #[arg(long)]
    export: bool,

    /// 匯出路徑，預設為 `{TICKER}_breakout_days.csv`
    #[arg(long)]
    output: Option<PathBuf>,

    /// 以 JSON 輸出完整掃描報告
    #[arg(long)]
    json: bool,

    /// 覆寫今日日期，用於重現歷史掃描
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    parse_date(input).map_err(|e| format!("無效的日期 '{}': {}", input, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config()?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let defaults = app_config.scan.to_params();
    let params = BreakoutParams::new(
        cli.volume_threshold.map(f64::from).unwrap_or(defaults.volume_threshold_pct),
        cli.price_threshold.map(f64::from).unwrap_or(defaults.price_change_threshold_pct),
        cli.holding_period.map(|h| h as usize).unwrap_or(defaults.holding_period),
    );
    let request = WindowRequest::new(cli.ticker.trim().to_uppercase(), cli.start, cli.end, params.holding_period);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| PathBuf::from(&app_config.data.directory));
    let scanner = BreakoutScanner::new(Arc::new(CsvDataProvider::new(data_dir)));

    if !cli.json {
        println!(
            "Fetching data for {} from {} to {}...",
            request.ticker, request.requested_start, request.requested_end
        );
    }
    info!("使用資料提供者 {}", scanner.provider().name());

    let scan = scanner
        .run(&request, &params, today)
        .await
        .map_err(|e| anyhow!("掃描失敗: {}", e))?;

    if cli.json {
        report::write_json(&scan, std::io::stdout().lock()).context("無法輸出 JSON 報告")?;
    } else {
        println!("{}", scan.status.message());
    }

    if let ScanStatus::Found(_) = scan.status {
        if !cli.json {
            println!("Breakout days preview:");
            print!("{}", report::preview(&scan.rows, app_config.scan.preview_rows));
        }

        if cli.export || cli.output.is_some() {
            let path = cli
                .output
                .unwrap_or_else(|| PathBuf::from(report::csv_file_name(&scan.ticker)));
            report::write_csv_file(&scan.rows, &path)
                .with_context(|| format!("無法寫入 {}", path.display()))?;
            if !cli.json {
                println!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let level = match log_config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into()))
        .with_writer(std::io::stderr);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}
