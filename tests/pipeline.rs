use std::fs;

use chrono::{TimeZone, Utc};
use futures::executor::block_on;
use tempfile::TempDir;

use finreport::config::Settings;
use finreport::export::document::{MemorySurfaceFactory, PdfSurfaceFactory, SECTION_TITLES};
use finreport::export::{
    import_snapshot, import_yaml, parse_tabular, regroup, tabular, ArtifactContent, ExportMode,
};
use finreport::models::AccountProfile;
use finreport::services::{write_artifact, ExportService};
use finreport::sources::{JsonDirSource, RecordSource};

fn text(content: ArtifactContent) -> String {
    match content {
        ArtifactContent::Text(text) => text,
        ArtifactContent::Binary(bytes) => panic!("expected text, got {} bytes", bytes.len()),
    }
}

fn seeded_dirs() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let remote = temp_dir.path().join("remote");
    let cache = temp_dir.path().join("cache");
    fs::create_dir_all(&remote).unwrap();
    fs::create_dir_all(&cache).unwrap();

    // Remote has debts but an unreadable budgets file; cache fills the gap.
    fs::write(
        remote.join("debts.json"),
        r#"{"debts": [{"name": "Car loan", "type": "auto_loan", "balance": "12,500.00", "interestRate": 6.5}]}"#,
    )
    .unwrap();
    fs::write(remote.join("budgets.json"), "{ not json").unwrap();
    fs::write(
        cache.join("budgets.json"),
        r#"{
            "2024-05": {
                "incomes": [{"name": "Salary", "amount": 4000}],
                "expenses": [
                    {"category": "Rent", "budgeted": 1500, "spent": 1500},
                    {"category": "Groceries", "budgeted": 400, "spent": 460}
                ]
            }
        }"#,
    )
    .unwrap();
    fs::write(
        cache.join("netWorthHistory.json"),
        r#"{"history": [
            {"date": "2024-04-01", "netWorth": 20000},
            {"date": "2024-05-01", "netWorth": 21000}
        ]}"#,
    )
    .unwrap();
    temp_dir
}

fn service(temp_dir: &TempDir, factory: MemorySurfaceFactory) -> ExportService {
    let sources: Vec<Box<dyn RecordSource>> = vec![
        Box::new(JsonDirSource::new("remote", temp_dir.path().join("remote"))),
        Box::new(JsonDirSource::new("cache", temp_dir.path().join("cache"))),
    ];
    ExportService::new(
        sources,
        Settings::default(),
        AccountProfile::new("Ada Lovelace", "ada@example.com", "uid-1"),
        Box::new(factory),
    )
}

#[test]
fn pipeline_snapshot_merges_sources() {
    let temp_dir = seeded_dirs();
    let at = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();
    let artifact =
        block_on(service(&temp_dir, MemorySurfaceFactory::new()).run_at(ExportMode::Snapshot, at))
            .unwrap();

    let envelope = import_snapshot(&text(artifact.content)).unwrap();
    let counts = &envelope.summary.dataset_counts;
    assert_eq!(counts.debts, 1);
    assert_eq!(counts.budgets, 1);
    assert_eq!(counts.net_worth_history, 2);
    assert_eq!(counts.total_datasets, 4);

    let metrics = &envelope.summary.metrics;
    assert_eq!(metrics.total_debt, 12_500.0);
    assert_eq!(metrics.income_total, 4000.0);
    assert_eq!(metrics.expense_actual, 1960.0);
    assert_eq!(metrics.net_cash_flow, 2040.0);
    assert_eq!(metrics.net_worth, Some(21_000.0));
    assert_eq!(metrics.net_worth_change, Some(1000.0));
    assert_eq!(metrics.savings_progress, None);
}

#[test]
fn pipeline_yaml_and_tabular_agree_with_snapshot() {
    let temp_dir = seeded_dirs();
    let service = service(&temp_dir, MemorySurfaceFactory::new());
    let at = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();

    let yaml = text(block_on(service.run_at(ExportMode::Yaml, at)).unwrap().content);
    assert!(yaml.starts_with("# finreport Financial Data Export"));
    let envelope = import_yaml(&yaml).unwrap();

    let csv = text(block_on(service.run_at(ExportMode::Tabular, at)).unwrap().content);
    let rows = parse_tabular(&csv).unwrap();
    let regrouped = regroup(&rows);
    assert_eq!(regrouped["debts"]["0.name"], "Car loan");
    assert_eq!(regrouped["budgets"]["0.month"], "2024-05");

    // Envelopes from separate runs differ only in export id
    let mut expected = tabular::snapshot_leaves(&envelope).unwrap();
    let mut actual = regrouped.clone();
    for leaves in [&mut expected, &mut actual] {
        if let Some(info) = leaves.get_mut("exportInfo") {
            info.remove("exportId");
        }
    }
    assert_eq!(actual, expected);
}

#[test]
fn pipeline_empty_sources_still_render_document() {
    let temp_dir = TempDir::new().unwrap();
    let factory = MemorySurfaceFactory::new();
    let log = factory.log();
    let service = service(&temp_dir, factory);

    let artifact = block_on(service.run("document")).unwrap();
    assert!(matches!(artifact.content, ArtifactContent::Binary(_)));

    for title in SECTION_TITLES {
        assert_eq!(log.pages_of(title).len(), 1, "missing section {}", title);
    }
    assert_eq!(log.pages_of("No debts recorded yet.").len(), 1);
}

#[test]
fn pipeline_pdf_written_atomically() {
    let temp_dir = seeded_dirs();
    let sources: Vec<Box<dyn RecordSource>> = vec![Box::new(JsonDirSource::new(
        "cache",
        temp_dir.path().join("cache"),
    ))];
    let service = ExportService::new(
        sources,
        Settings::default(),
        AccountProfile::anonymous(),
        Box::new(PdfSurfaceFactory::with_title("finreport Financial Report")),
    );

    let artifact = block_on(service.run("pdf")).unwrap();
    let out = temp_dir.path().join("exports");
    let path = write_artifact(&out, &artifact).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("finreport-financial-report-"));

    let leftovers: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}
