//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the poster directory site and
//! run full harvests end-to-end into temporary directories.

use poster_harvest::config::{Config, CrawlerConfig, HttpConfig, OutputConfig, Policy, SiteConfig};
use poster_harvest::crawler::Shutdown;
use poster_harvest::storage::{FsStorage, Storage, StorageError, StorageResult};
use poster_harvest::{FetchOutcome, HarvestError, Harvester};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PDF: &[u8] = b"%PDF-1.4 poster body";

/// Creates a test configuration pointing every URL at the mock server
fn create_test_config(base_url: &str, files_dir: &Path, policy: Policy) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            directory_url: format!("{}/", base_url),
            viewer_url: format!("{}/viewer", base_url),
        },
        http: HttpConfig {
            user_agent: "TestBrowser/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        crawler: CrawlerConfig {
            policy,
            poster_delay_ms: 10, // Very short for testing
            max_concurrent_requests: 4,
        },
        output: OutputConfig {
            files_dir: files_dir.to_string_lossy().into_owned(),
            summary_path: None,
        },
    }
}

fn directory_page(states: &[(&str, String)]) -> String {
    let rows: String = states
        .iter()
        .enumerate()
        .map(|(i, (name, href))| {
            let class = if i == 0 { " class=\"sf-al\"" } else { "" };
            format!(r#"<tr><td{}><a href="{}">{}</a></td><td>posters</td></tr>"#, class, href, name)
        })
        .collect();
    format!(
        "<html><body><h1>Labor posters</h1><table><tbody>{}</tbody></table></body></html>",
        rows
    )
}

fn index_page(poster_hrefs: &[String]) -> String {
    let items: String = poster_hrefs
        .iter()
        .map(|href| format!(r#"<div class="poster-name"><a href="{}">Poster</a></div>"#, href))
        .collect();
    format!(
        r#"<html><body><div class="tab-content">{}</div></body></html>"#,
        items
    )
}

fn viewer_poster_page(src: &str) -> String {
    format!(
        r#"<html><body><h1>Poster</h1><object data="x"><iframe src="{}"></iframe></object></body></html>"#,
        src
    )
}

fn labeled_poster_page(href: &str) -> String {
    format!(
        r#"<html><body><p>Original poster PDF: <a href="{}">Download</a></p></body></html>"#,
        href
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_pdf(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF.to_vec()))
        .mount(server)
        .await;
}

/// Directory with California -> one poster embedded via a root-relative iframe
async fn mount_single_poster_site(server: &MockServer) {
    let base = server.uri();
    mount_html(
        server,
        "/",
        directory_page(&[("California", format!("{}/ca", base))]),
    )
    .await;
    mount_html(server, "/ca", index_page(&[format!("{}/ca/poster1", base)])).await;
    mount_html(server, "/ca/poster1", viewer_poster_page("/embed/abc.pdf")).await;
    mount_pdf(server, "/embed/abc.pdf").await;
}

async fn count_requests(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter(|r| r.url.path() == route)
        .count()
}

/// Relative path -> contents for every file under `root`
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for state in std::fs::read_dir(root).unwrap() {
        let state = state.unwrap();
        for file in std::fs::read_dir(state.path()).unwrap() {
            let file = file.unwrap();
            let key = format!(
                "{}/{}",
                state.file_name().to_string_lossy(),
                file.file_name().to_string_lossy()
            );
            files.insert(key, std::fs::read(file.path()).unwrap());
        }
    }
    files
}

#[tokio::test]
async fn test_end_to_end_single_poster() {
    let server = MockServer::start().await;
    mount_single_poster_site(&server).await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&server.uri(), &files, Policy::Parallel);

    let harvester = Harvester::new(config).expect("Failed to create harvester");
    let report = harvester.run().await.expect("Harvest failed");

    let saved = files.join("California").join("abc.pdf");
    assert!(saved.exists());
    assert!(std::fs::metadata(&saved).unwrap().len() > 0);
    assert_eq!(report.counts_line(), "Saved: 1, Skipped: 0, Failed: 0");
    assert_eq!(report.states, 1);
}

#[tokio::test]
async fn test_filename_comes_from_resolved_asset_url() {
    let server = MockServer::start().await;
    mount_single_poster_site(&server).await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&server.uri(), &files, Policy::Sequential);

    Harvester::new(config).unwrap().run().await.unwrap();

    // The page is /ca/poster1 but the stored name follows the PDF URL
    assert!(files.join("California/abc.pdf").exists());
    assert!(!files.join("California/poster1").exists());
}

#[tokio::test]
async fn test_labeled_text_wins_and_embed_is_never_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", directory_page(&[("Ohio", format!("{}/oh", base))])).await;
    mount_html(&server, "/oh", index_page(&[format!("{}/oh/wage", base)])).await;

    let page = format!(
        r#"<html><body><p>Original poster PDF: <a href="{}/pdf/wage.pdf">Download</a></p>
        <object><iframe src="/embed/other.pdf"></iframe></object></body></html>"#,
        base
    );
    mount_html(&server, "/oh/wage", page).await;
    mount_pdf(&server, "/pdf/wage.pdf").await;
    Mock::given(method("GET"))
        .and(path("/embed/other.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF.to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&base, &files, Policy::Parallel);

    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.saved(), 1);
    assert!(files.join("Ohio/wage.pdf").exists());
    assert!(!files.join("Ohio/other.pdf").exists());
}

#[tokio::test]
async fn test_viewer_redirect_uses_inner_target_only() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", directory_page(&[("Texas", format!("{}/tx", base))])).await;
    mount_html(&server, "/tx", index_page(&[format!("{}/tx/p", base)])).await;

    let src = format!("{}/viewer?url={}/real/notice.pdf&amp;embedded=true", base, base);
    mount_html(&server, "/tx/p", viewer_poster_page(&src)).await;
    mount_pdf(&server, "/real/notice.pdf").await;
    Mock::given(method("GET"))
        .and(path("/viewer"))
        .respond_with(ResponseTemplate::new(200).set_body_string("viewer"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&base, &files, Policy::Parallel);

    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.counts_line(), "Saved: 1, Skipped: 0, Failed: 0");
    assert_eq!(std::fs::read(files.join("Texas/notice.pdf")).unwrap(), PDF);
}

#[tokio::test]
async fn test_falls_through_when_labeled_link_is_forbidden() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", directory_page(&[("Utah", format!("{}/ut", base))])).await;
    mount_html(&server, "/ut", index_page(&[format!("{}/ut/p", base)])).await;

    let page = format!(
        r#"<html><body><p>Original poster PDF: <a href="{}/blocked.pdf">Download</a></p>
        <object><iframe src="/embed/mirror.pdf"></iframe></object></body></html>"#,
        base
    );
    mount_html(&server, "/ut/p", page).await;
    Mock::given(method("GET"))
        .and(path("/blocked.pdf"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    mount_pdf(&server, "/embed/mirror.pdf").await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&base, &files, Policy::Sequential);

    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.saved(), 1);
    assert!(files.join("Utah/mirror.pdf").exists());
    assert!(!files.join("Utah/blocked.pdf").exists());
}

#[tokio::test]
async fn test_partial_failure_isolation() {
    let server = MockServer::start().await;
    let base = server.uri();

    let posters: Vec<String> = (1..=10).map(|i| format!("{}/wa/p{}", base, i)).collect();
    mount_html(&server, "/", directory_page(&[("Washington", format!("{}/wa", base))])).await;
    mount_html(&server, "/wa", index_page(&posters)).await;

    for i in 1..=10 {
        let page = if i == 3 {
            "<html><body><p>This poster has moved.</p></body></html>".to_string()
        } else {
            viewer_poster_page(&format!("/embed/wa{}.pdf", i))
        };
        mount_html(&server, &format!("/wa/p{}", i), page).await;
        mount_pdf(&server, &format!("/embed/wa{}.pdf", i)).await;
    }

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&base, &files, Policy::Parallel);

    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.saved(), 9);
    assert_eq!(report.failed(), 1);
    for i in (1..=10).filter(|i| *i != 3) {
        assert!(files.join(format!("Washington/wa{}.pdf", i)).exists());
    }

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures[0].page_url, format!("{}/wa/p3", base));
    assert_eq!(failures[0].attempt_errors.len(), 2);
    assert!(failures[0].attempt_errors[0].starts_with("attempt 0 (labeled-text)"));
    assert!(failures[0].attempt_errors[1].starts_with("attempt 1 (embedded-viewer)"));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mount_single_poster_site(&server).await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");

    let first = Harvester::new(create_test_config(&server.uri(), &files, Policy::Parallel))
        .unwrap()
        .run()
        .await
        .unwrap();
    let after_first = snapshot(&files);

    let second = Harvester::new(create_test_config(&server.uri(), &files, Policy::Parallel))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(first.saved(), 1);
    assert_eq!(second.counts_line(), "Saved: 0, Skipped: 1, Failed: 0");
    assert!(second.outcomes.iter().all(FetchOutcome::is_skipped));
    assert_eq!(snapshot(&files), after_first);
    assert_eq!(count_requests(&server, "/embed/abc.pdf").await, 1);
}

#[tokio::test]
async fn test_existing_file_skipped_without_asset_fetch() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", directory_page(&[("California", format!("{}/ca", base))])).await;
    mount_html(&server, "/ca", index_page(&[format!("{}/ca/poster1", base)])).await;
    mount_html(&server, "/ca/poster1", viewer_poster_page("/embed/abc.pdf")).await;
    Mock::given(method("GET"))
        .and(path("/embed/abc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF.to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    std::fs::create_dir_all(files.join("California")).unwrap();
    std::fs::write(files.join("California/abc.pdf"), b"from an earlier run").unwrap();

    let config = create_test_config(&base, &files, Policy::Sequential);
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![FetchOutcome::Skipped(files.join("California").join("abc.pdf"))]
    );
    assert_eq!(
        std::fs::read(files.join("California/abc.pdf")).unwrap(),
        b"from an earlier run"
    );
}

#[tokio::test]
async fn test_parallel_and_sequential_produce_same_files() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        directory_page(&[
            ("Alaska", format!("{}/ak", base)),
            ("Maine", format!("{}/me", base)),
        ]),
    )
    .await;
    mount_html(
        &server,
        "/ak",
        index_page(&[format!("{}/ak/a", base), format!("{}/ak/b", base)]),
    )
    .await;
    mount_html(&server, "/me", index_page(&[format!("{}/me/c", base)])).await;
    mount_html(&server, "/ak/a", viewer_poster_page("/embed/a.pdf")).await;
    mount_html(
        &server,
        "/ak/b",
        labeled_poster_page(&format!("{}/direct/b.pdf", base)),
    )
    .await;
    mount_html(&server, "/me/c", viewer_poster_page("/embed/c.pdf")).await;
    mount_pdf(&server, "/embed/a.pdf").await;
    mount_pdf(&server, "/direct/b.pdf").await;
    mount_pdf(&server, "/embed/c.pdf").await;

    let parallel_dir = TempDir::new().unwrap();
    let sequential_dir = TempDir::new().unwrap();

    let parallel = Harvester::new(create_test_config(&base, parallel_dir.path(), Policy::Parallel))
        .unwrap()
        .run()
        .await
        .unwrap();
    let sequential = Harvester::new(create_test_config(
        &base,
        sequential_dir.path(),
        Policy::Sequential,
    ))
    .unwrap()
    .run()
    .await
    .unwrap();

    assert_eq!(parallel.saved(), 3);
    assert_eq!(sequential.saved(), 3);

    let expected: Vec<String> = vec![
        "Alaska/a.pdf".to_string(),
        "Alaska/b.pdf".to_string(),
        "Maine/c.pdf".to_string(),
    ];
    let parallel_files = snapshot(parallel_dir.path());
    assert_eq!(parallel_files.keys().cloned().collect::<Vec<_>>(), expected);
    assert_eq!(parallel_files, snapshot(sequential_dir.path()));
}

#[tokio::test]
async fn test_directory_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir.path().join("files"), Policy::Parallel);

    let err = Harvester::new(config).unwrap().run().await.unwrap_err();

    assert!(matches!(err, HarvestError::Directory { .. }));
    assert_eq!(err.stage(), "directory");
}

#[tokio::test]
async fn test_state_index_failure_is_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", directory_page(&[("Nevada", format!("{}/nv", base))])).await;
    Mock::given(method("GET"))
        .and(path("/nv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&base, &files, Policy::Sequential);

    let err = Harvester::new(config).unwrap().run().await.unwrap_err();

    match &err {
        HarvestError::StateIndex { state, source, .. } => {
            assert_eq!(state, "Nevada");
            assert_eq!(source.status(), Some(404));
        }
        other => panic!("expected StateIndex error, got {:?}", other),
    }
    assert_eq!(err.stage(), "state index");
    // Directories are created before any state is crawled
    assert!(files.join("Nevada").is_dir());
}

#[tokio::test]
async fn test_poster_page_failure_is_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", directory_page(&[("Iowa", format!("{}/ia", base))])).await;
    mount_html(
        &server,
        "/ia",
        index_page(&[format!("{}/ia/gone", base), format!("{}/ia/ok", base)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/ia/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_html(&server, "/ia/ok", viewer_poster_page("/embed/ok.pdf")).await;
    mount_pdf(&server, "/embed/ok.pdf").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base, &dir.path().join("files"), Policy::Parallel);

    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.counts_line(), "Saved: 1, Skipped: 0, Failed: 1");
    match &report.outcomes[0] {
        FetchOutcome::Failed {
            page_url,
            attempt_errors,
        } => {
            assert_eq!(page_url, &format!("{}/ia/gone", base));
            assert!(attempt_errors[0].contains("500"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_discover_lists_states_in_page_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        directory_page(&[
            ("Alabama", format!("{}/al", base)),
            ("Alaska", "/ak".to_string()),
            ("Arizona", format!("{}/az", base)),
        ]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base, &dir.path().join("files"), Policy::Parallel);

    let states = Harvester::new(config).unwrap().discover().await.unwrap();

    let names: Vec<&str> = states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alabama", "Alaska", "Arizona"]);
    assert_eq!(states[1].index_url, format!("{}/ak", base));
}

/// Filesystem storage whose writes fail for one filename
struct FailingStorage {
    inner: FsStorage,
    broken: &'static str,
}

impl Storage for FailingStorage {
    fn prepare_state(&self, state: &str) -> StorageResult<PathBuf> {
        self.inner.prepare_state(state)
    }

    fn path_for(&self, state: &str, filename: &str) -> StorageResult<PathBuf> {
        self.inner.path_for(state, filename)
    }

    fn contains(&self, state: &str, filename: &str) -> StorageResult<bool> {
        self.inner.contains(state, filename)
    }

    fn store(&self, state: &str, filename: &str, bytes: &[u8]) -> StorageResult<PathBuf> {
        if filename == self.broken {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.store(state, filename, bytes)
    }
}

/// Filesystem storage that stops the run after its first write
struct StopAfterFirstStore {
    inner: FsStorage,
    shutdown: OnceLock<Shutdown>,
}

impl Storage for StopAfterFirstStore {
    fn prepare_state(&self, state: &str) -> StorageResult<PathBuf> {
        self.inner.prepare_state(state)
    }

    fn path_for(&self, state: &str, filename: &str) -> StorageResult<PathBuf> {
        self.inner.path_for(state, filename)
    }

    fn contains(&self, state: &str, filename: &str) -> StorageResult<bool> {
        self.inner.contains(state, filename)
    }

    fn store(&self, state: &str, filename: &str, bytes: &[u8]) -> StorageResult<PathBuf> {
        let path = self.inner.store(state, filename, bytes)?;
        if let Some(shutdown) = self.shutdown.get() {
            shutdown.trigger();
        }
        Ok(path)
    }
}

/// One state with three embedded posters: a.pdf, b.pdf, c.pdf
async fn mount_three_poster_site(server: &MockServer) {
    let base = server.uri();
    mount_html(server, "/", directory_page(&[("Oregon", format!("{}/or", base))])).await;
    mount_html(
        server,
        "/or",
        index_page(&[
            format!("{}/or/a", base),
            format!("{}/or/b", base),
            format!("{}/or/c", base),
        ]),
    )
    .await;
    for name in ["a", "b", "c"] {
        mount_html(
            server,
            &format!("/or/{}", name),
            viewer_poster_page(&format!("/embed/{}.pdf", name)),
        )
        .await;
        mount_pdf(server, &format!("/embed/{}.pdf", name)).await;
    }
}

#[tokio::test]
async fn test_storage_failure_is_recorded_per_poster() {
    let server = MockServer::start().await;
    mount_three_poster_site(&server).await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let storage = Arc::new(FailingStorage {
        inner: FsStorage::new(&files).unwrap(),
        broken: "b.pdf",
    });
    let config = create_test_config(&server.uri(), &files, Policy::Parallel);

    let report = Harvester::with_storage(config, storage)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.counts_line(), "Saved: 2, Skipped: 0, Failed: 1");
    assert!(report.outcomes[0].is_saved());
    assert!(report.outcomes[2].is_saved());
    match &report.outcomes[1] {
        FetchOutcome::Failed {
            page_url,
            attempt_errors,
        } => {
            assert_eq!(page_url, &format!("{}/or/b", server.uri()));
            assert_eq!(attempt_errors.len(), 1);
            assert!(attempt_errors[0].starts_with("storage:"));
            assert!(attempt_errors[0].contains("disk full"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(files.join("Oregon/a.pdf").exists());
    assert!(!files.join("Oregon/b.pdf").exists());
    assert!(files.join("Oregon/c.pdf").exists());
}

#[tokio::test]
async fn test_shutdown_returns_partial_report() {
    let server = MockServer::start().await;
    mount_three_poster_site(&server).await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let storage = Arc::new(StopAfterFirstStore {
        inner: FsStorage::new(&files).unwrap(),
        shutdown: OnceLock::new(),
    });
    let config = create_test_config(&server.uri(), &files, Policy::Sequential);

    let harvester = Harvester::with_storage(config, Arc::clone(&storage) as Arc<dyn Storage>).unwrap();
    storage.shutdown.set(harvester.shutdown()).ok();

    let report = harvester.run().await.unwrap();

    assert!(report.interrupted);
    assert_eq!(report.counts_line(), "Saved: 1, Skipped: 0, Failed: 0");
    assert!(files.join("Oregon/a.pdf").exists());
    assert!(!files.join("Oregon/b.pdf").exists());
    assert_eq!(count_requests(&server, "/or/b").await, 0);
}

#[tokio::test]
async fn test_unusable_state_name_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        directory_page(&[
            ("California", format!("{}/ca", base)),
            ("..", format!("{}/dotdot", base)),
        ]),
    )
    .await;
    mount_html(&server, "/ca", index_page(&[format!("{}/ca/poster1", base)])).await;
    mount_html(&server, "/ca/poster1", viewer_poster_page("/embed/abc.pdf")).await;
    mount_pdf(&server, "/embed/abc.pdf").await;
    Mock::given(method("GET"))
        .and(path("/dotdot"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_page(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = dir.path().join("files");
    let config = create_test_config(&base, &files, Policy::Parallel);

    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.states, 1);
    assert_eq!(report.counts_line(), "Saved: 1, Skipped: 0, Failed: 0");
    assert!(files.join("California/abc.pdf").exists());
}
