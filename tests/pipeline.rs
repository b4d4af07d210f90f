use pizza_scraper::{
    config::Config, vendors, ConfirmOverwrite, FetchFailure, HttpFetcher, Overwrite, Pipeline,
    PipelineReport, Vendor, VendorStatus,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GINO: &str = include_str!("htmls/gino.html");
const KEREKES: &str = include_str!("htmls/kerekes.html");
const PECSENYE: &str = include_str!("htmls/pecsenye.html");

async fn mount(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// The default vendors, pointed at `server`.
fn local_vendors(server: &MockServer) -> Vec<Vendor> {
    vendors::default_vendors()
        .into_iter()
        .map(|v| {
            let url = format!("{}/{}", server.uri(), v.id.to_lowercase());
            v.with_url(url)
        })
        .collect()
}

fn config(dir: &TempDir) -> Config {
    Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

async fn run<C: ConfirmOverwrite>(
    server: &MockServer,
    confirm: C,
    config: Config,
) -> PipelineReport {
    let fetcher = HttpFetcher::new(&config).unwrap();
    Pipeline::new(fetcher, confirm, config)
        .run(&local_vendors(server))
        .await
        .unwrap()
}

fn read(dir: &TempDir, file: &str) -> String {
    fs::read_to_string(dir.path().join(file)).unwrap()
}

fn statuses(report: &PipelineReport) -> Vec<(&str, &VendorStatus)> {
    report
        .vendors
        .iter()
        .map(|v| (v.vendor.as_str(), &v.status))
        .collect()
}

#[derive(Default)]
struct RecordingConfirm {
    asked: Mutex<Vec<PathBuf>>,
}

#[async_trait::async_trait]
impl ConfirmOverwrite for RecordingConfirm {
    async fn confirm_overwrite(&self, target: &Path) -> bool {
        self.asked.lock().unwrap().push(target.to_path_buf());
        true
    }
}

/// Log output captured for the duration of one test.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let buffer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || buffer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn aggregate_is_concatenation_in_vendor_order() {
    let server = MockServer::start().await;
    mount(&server, "/gino", GINO).await;
    mount(&server, "/kerekes", KEREKES).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let dir = tempfile::tempdir().unwrap();

    let report = run(&server, Overwrite::Never, config(&dir)).await;

    assert!(!report.has_failures());
    assert_eq!(
        report.vendors.iter().map(|v| v.records).collect::<Vec<_>>(),
        vec![8, 3, 38]
    );
    assert_eq!(report.vendors[1].skipped.len(), 1);
    assert_eq!(report.aggregate, Some(dir.path().join("pizza.txt")));

    let gino = read(&dir, "gino.txt");
    let kerekes = read(&dir, "kerekes.txt");
    let pecsenye = read(&dir, "pecsenye.txt");
    assert_eq!(
        read(&dir, "pizza.txt"),
        format!("{gino}{kerekes}{pecsenye}")
    );

    assert!(gino.starts_with("28,1290,Gino,Margherita\n45,2390,Gino,Margherita\n"));
    assert_eq!(
        kerekes,
        "28,1290,Kerekes,Margherita\n28,1590,Kerekes,Sonkás-gombás\n28,1890,Kerekes,Kerekes kedvence\n"
    );
    assert_eq!(pecsenye.lines().count(), 38);
    assert!(pecsenye.ends_with("30,2490,Pecsenye,Pecsenye különleges\n"));
}

#[tokio::test]
async fn failed_vendor_is_left_out_of_aggregate() {
    let server = MockServer::start().await;
    mount(&server, "/gino", GINO).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let dir = tempfile::tempdir().unwrap();

    let logs = LogBuffer::default();
    let report = {
        let _guard = logs.install();
        run(&server, Overwrite::Never, config(&dir)).await
    };

    let logs = logs.contents();
    assert!(logs
        .lines()
        .any(|l| l.contains("ERROR") && l.contains("Failed to scrape Kerekes")));
    assert!(!logs.contains("Failed to scrape Gino"));
    assert!(!logs.contains("Failed to scrape Pecsenye"));

    assert_eq!(
        statuses(&report),
        vec![
            ("Gino", &VendorStatus::Written),
            ("Kerekes", &VendorStatus::FetchFailed(FetchFailure::Status(404))),
            ("Pecsenye", &VendorStatus::Written),
        ]
    );
    assert!(report.has_failures());
    assert_eq!(
        report.failed().map(|v| v.vendor.as_str()).collect::<Vec<_>>(),
        vec!["Kerekes"]
    );
    assert!(!dir.path().join("kerekes.txt").exists());
    assert_eq!(
        read(&dir, "pizza.txt"),
        format!("{}{}", read(&dir, "gino.txt"), read(&dir, "pecsenye.txt"))
    );
}

#[tokio::test]
async fn unwritable_output_fails_the_vendor_only() {
    let server = MockServer::start().await;
    mount(&server, "/gino", GINO).await;
    mount(&server, "/kerekes", KEREKES).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("kerekes.txt")).unwrap();

    let report = run(&server, Overwrite::Always, config(&dir)).await;

    assert_eq!(report.vendors[0].status, VendorStatus::Written);
    assert!(matches!(
        report.vendors[1].status,
        VendorStatus::WriteFailed(_)
    ));
    assert_eq!(report.vendors[2].status, VendorStatus::Written);
    assert!(report.has_failures());
    assert_eq!(
        report.failed().map(|v| v.vendor.as_str()).collect::<Vec<_>>(),
        vec!["Kerekes"]
    );
    assert!(dir.path().join("kerekes.txt").is_dir());
    assert_eq!(report.aggregate, Some(dir.path().join("pizza.txt")));
    assert_eq!(
        read(&dir, "pizza.txt"),
        format!("{}{}", read(&dir, "gino.txt"), read(&dir, "pecsenye.txt"))
    );
}

#[tokio::test]
async fn page_without_items_fails_the_vendor_only() {
    let server = MockServer::start().await;
    mount(&server, "/gino", "<html><body><p>Zárva</p></body></html>").await;
    mount(&server, "/kerekes", KEREKES).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gino.txt"), "28,1190,Gino,Régi\n").unwrap();

    let report = run(&server, Overwrite::Always, config(&dir)).await;

    assert_eq!(report.vendors[0].status, VendorStatus::NoRecords);
    assert!(report.has_failures());
    assert_eq!(read(&dir, "gino.txt"), "28,1190,Gino,Régi\n");
    assert_eq!(
        read(&dir, "pizza.txt"),
        format!("{}{}", read(&dir, "kerekes.txt"), read(&dir, "pecsenye.txt"))
    );
}

#[tokio::test]
async fn declined_overwrite_keeps_old_output() {
    let server = MockServer::start().await;
    mount(&server, "/gino", GINO).await;
    mount(&server, "/kerekes", KEREKES).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("kerekes.txt"), "28,990,Kerekes,Régi\n").unwrap();
    fs::write(dir.path().join("pizza.txt"), "régi\n").unwrap();

    let report = run(&server, Overwrite::Never, config(&dir)).await;

    assert_eq!(report.vendors[1].status, VendorStatus::Declined);
    assert!(!report.has_failures());
    assert_eq!(read(&dir, "kerekes.txt"), "28,990,Kerekes,Régi\n");
    assert_eq!(report.aggregate, None);
    assert_eq!(read(&dir, "pizza.txt"), "régi\n");
}

#[tokio::test]
async fn asks_only_for_existing_files() {
    let server = MockServer::start().await;
    mount(&server, "/gino", GINO).await;
    mount(&server, "/kerekes", KEREKES).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let dir = tempfile::tempdir().unwrap();

    let confirm = RecordingConfirm::default();
    let first = run(&server, &confirm, config(&dir)).await;
    assert!(confirm.asked.lock().unwrap().is_empty());

    let second = run(&server, &confirm, config(&dir)).await;
    assert_eq!(
        *confirm.asked.lock().unwrap(),
        ["gino.txt", "kerekes.txt", "pecsenye.txt", "pizza.txt"]
            .iter()
            .map(|f| dir.path().join(f))
            .collect::<Vec<_>>()
    );
    assert_eq!(first.aggregate, second.aggregate);
}

#[tokio::test]
async fn concurrent_fetches_keep_vendor_order() {
    let server = MockServer::start().await;
    mount(&server, "/gino", GINO).await;
    mount(&server, "/kerekes", KEREKES).await;
    mount(&server, "/pecsenye", PECSENYE).await;
    let sequential = tempfile::tempdir().unwrap();
    let concurrent = tempfile::tempdir().unwrap();

    run(&server, Overwrite::Never, config(&sequential)).await;
    let report = run(
        &server,
        Overwrite::Never,
        Config {
            concurrency: 3,
            ..config(&concurrent)
        },
    )
    .await;

    assert_eq!(
        report
            .vendors
            .iter()
            .map(|v| v.vendor.as_str())
            .collect::<Vec<_>>(),
        vec!["Gino", "Kerekes", "Pecsenye"]
    );
    assert_eq!(read(&concurrent, "pizza.txt"), read(&sequential, "pizza.txt"));
}
