mod common;

use assert_matches::assert_matches;
use breakout_scanner::analysis::run;
use breakout_scanner::data_provider::{CsvDataProvider, InMemoryDataProvider, MarketDataProvider};
use breakout_scanner::domain_types::{BreakoutParams, PriceTable, WindowRequest};
use breakout_scanner::report;
use breakout_scanner::{BreakoutScanner, EmptyReason, ScanError, ScanStatus};
use common::{date, flat_table, spike_table, FailingProvider, TICKER};
use std::fmt::Write as _;
use std::sync::Arc;

fn scanner_for(table: PriceTable) -> BreakoutScanner {
    BreakoutScanner::new(Arc::new(InMemoryDataProvider::new().with_table(table)))
}

/// 把價格表寫成 `{TICKER}.csv`
fn write_price_csv(dir: &std::path::Path, table: &PriceTable) {
    let mut content = String::from("Date,Adj Close,Volume\n");
    for row in table.rows() {
        let _ = writeln!(content, "{},{},{}", row.date, row.adjusted_close, row.volume);
    }
    std::fs::write(dir.join(format!("{}.csv", table.ticker())), content).unwrap();
}

#[tokio::test]
async fn test_scan_reports_found_breakouts() {
    let table = spike_table(date(2024, 1, 1), 3.0, 3, 5);
    let spike_day = table.rows()[20].date;
    let scanner = scanner_for(table);

    let request = WindowRequest::new(TICKER, date(2024, 1, 1), spike_day, 5);
    let report = scanner
        .run(&request, &BreakoutParams::new(200.0, 2.0, 5), date(2025, 1, 1))
        .await
        .unwrap();

    assert_eq!(report.ticker, TICKER);
    assert_eq!(report.status, ScanStatus::Found(1));
    assert!(report.has_breakouts());
    assert_eq!(report.rows[0].date, spike_day);
}

#[tokio::test]
async fn test_scan_distinguishes_no_breakouts_from_no_data() {
    let scanner = scanner_for(spike_table(date(2024, 1, 1), 1.0, 3, 5));
    let params = BreakoutParams::new(200.0, 2.0, 5);

    let request = WindowRequest::new(TICKER, date(2024, 1, 1), date(2024, 1, 29), 5);
    let report = scanner.run(&request, &params, date(2025, 1, 1)).await.unwrap();
    assert_eq!(report.status, ScanStatus::NoBreakouts);
    assert!(report.rows.is_empty());
    assert_eq!(report.status.message(), "No breakout days found.");

    let early = WindowRequest::new(TICKER, date(2019, 1, 1), date(2019, 2, 1), 5);
    let report = scanner.run(&early, &params, date(2025, 1, 1)).await.unwrap();
    assert_eq!(report.status, ScanStatus::NoData(EmptyReason::NoData));
    assert!(report.status.message().starts_with("No stock data found"));
}

#[tokio::test]
async fn test_scan_with_failing_provider_is_no_data() {
    let scanner = BreakoutScanner::new(Arc::new(FailingProvider));
    let request = WindowRequest::new(TICKER, date(2024, 1, 1), date(2024, 3, 1), 5);

    let report = scanner
        .run(&request, &BreakoutParams::new(200.0, 2.0, 5), date(2025, 1, 1))
        .await
        .unwrap();
    assert_matches!(report.status, ScanStatus::NoData(EmptyReason::ProviderFailed(_)));
    assert!(report.into_rows().is_empty());
}

#[tokio::test]
async fn test_scan_rejects_mismatched_holding_period() {
    let scanner = scanner_for(flat_table(date(2024, 1, 1), 60, 10.0, 100));
    let request = WindowRequest::new(TICKER, date(2024, 1, 1), date(2024, 2, 1), 5);

    let result = scanner
        .run(&request, &BreakoutParams::new(200.0, 2.0, 10), date(2025, 1, 1))
        .await;
    assert_matches!(result, Err(ScanError::InvalidParams(_)));
}

#[tokio::test]
async fn test_run_returns_plain_rows() {
    let table = spike_table(date(2024, 1, 1), 5.0, 4, 10);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(InMemoryDataProvider::new().with_table(table));
    let request = WindowRequest::new(TICKER, date(2024, 1, 1), date(2024, 2, 15), 10);
    let params = BreakoutParams::new(300.0, 4.0, 10);

    let first = run(provider.clone(), &request, &params, date(2025, 1, 1)).await.unwrap();
    let second = run(provider, &request, &params, date(2025, 1, 1)).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_csv_round_trip_scan_and_export() {
    let data_dir = tempfile::tempdir().unwrap();
    let table = spike_table(date(2024, 1, 1), 3.0, 3, 5);
    let spike_day = table.rows()[20].date;
    write_price_csv(data_dir.path(), &table);

    let scanner = BreakoutScanner::new(Arc::new(CsvDataProvider::new(data_dir.path())));
    let request = WindowRequest::new("test", spike_day, spike_day, 5);
    let scan = scanner
        .run(&request, &BreakoutParams::new(200.0, 2.0, 5), date(2025, 1, 1))
        .await
        .unwrap();
    assert_eq!(scan.status, ScanStatus::Found(1));

    let out_dir = tempfile::tempdir().unwrap();
    let path = out_dir.path().join(report::csv_file_name(&scan.ticker));
    report::write_csv_file(&scan.rows, &path).unwrap();

    let exported = std::fs::read_to_string(&path).unwrap();
    let mut lines = exported.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Adj Close,Volume,20DayAvgVolume,Return,VolumeBreakout,PriceChange,PriceBreakout,Breakout")
    );
    let data = lines.next().unwrap();
    assert!(data.starts_with(&format!("{},", spike_day)));
    assert!(data.ends_with(",true,true"));
    assert!(path.ends_with("TEST_breakout_days.csv"));
}
