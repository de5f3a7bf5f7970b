use std::fs;
use tempfile::{TempDir, tempdir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use vitrine_base::config::ServerConfig;
use vitrine_web::Server;

const INDEX_TEMPLATE: &str = "<h1>Welcome to the homepage</h1>";
const NOT_FOUND_TEMPLATE: &str = "<h1>Page not found</h1>";
const CONTAINERS_PAGE: &str = "<html><body>containers</body></html>";
const STYLESHEET: &str = "body { margin: 0; }\n";

struct TestSite {
    dir: TempDir,
}

impl TestSite {
    /// Lays out a site fixture: a `public/` asset root and a `views/`
    /// template directory inside a temporary directory.
    fn new() -> Self {
        let dir = tempdir().unwrap();

        let public = dir.path().join("public");
        fs::create_dir(&public).unwrap();
        fs::write(public.join("containers.html"), CONTAINERS_PAGE).unwrap();
        fs::write(public.join("style.css"), STYLESHEET).unwrap();
        fs::create_dir(public.join("images")).unwrap();
        fs::write(public.join("images").join("logo.svg"), "<svg></svg>").unwrap();

        let views = dir.path().join("views");
        fs::create_dir(&views).unwrap();
        fs::write(views.join("index.html"), INDEX_TEMPLATE).unwrap();
        fs::write(views.join("404.html"), NOT_FOUND_TEMPLATE).unwrap();

        TestSite { dir }
    }

    fn config(&self) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.static_dir = self.dir.path().join("public").to_string_lossy().into_owned();
        config.templates.dir = self.dir.path().join("views").to_string_lossy().into_owned();
        config
    }

    fn public(&self) -> std::path::PathBuf {
        self.dir.path().join("public")
    }

    fn views(&self) -> std::path::PathBuf {
        self.dir.path().join("views")
    }
}

/// Mounts the site's router on an ephemeral port and returns the base URL.
async fn spawn_site(site: &TestSite) -> String {
    let server = Server::new(&site.config());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server.router()).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn index_renders_as_html() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(response.text().await.unwrap(), INDEX_TEMPLATE);
}

#[tokio::test]
async fn containers_page_serves_file_bytes() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let on_disk = fs::read(site.public().join("containers.html")).unwrap();
    let response = reqwest::get(format!("{}/containers", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.bytes().await.unwrap().as_ref(), on_disk.as_slice());
}

#[tokio::test]
async fn static_asset_has_inferred_content_type_and_exact_bytes() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let on_disk = fs::read(site.public().join("style.css")).unwrap();
    let response = reqwest::get(format!("{}/style.css", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/css"));
    assert_eq!(response.bytes().await.unwrap().as_ref(), on_disk.as_slice());
}

#[tokio::test]
async fn nested_asset_is_served() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/images/logo.svg", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<svg></svg>");
}

#[tokio::test]
async fn unknown_path_is_404_with_template_body() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/nonexistent-page", base)).await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), NOT_FOUND_TEMPLATE);
}

#[tokio::test]
async fn unknown_path_is_404_without_template() {
    let site = TestSite::new();
    fs::remove_file(site.views().join("404.html")).unwrap();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/nonexistent-page", base)).await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Not Found");
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let url = format!("{}/containers", base);
    let first = reqwest::get(&url).await.unwrap();
    let first = (first.status(), first.bytes().await.unwrap());
    let second = reqwest::get(&url).await.unwrap();
    let second = (second.status(), second.bytes().await.unwrap());
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_index_template_is_500() {
    let site = TestSite::new();
    fs::remove_file(site.views().join("index.html")).unwrap();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), 500);
    // Internal detail must not leak into the body.
    assert_eq!(response.text().await.unwrap(), "Internal Server Error");
}

#[tokio::test]
async fn missing_containers_file_is_500() {
    let site = TestSite::new();
    fs::remove_file(site.public().join("containers.html")).unwrap();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/containers", base)).await.unwrap();
    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn non_get_methods_are_404() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;
    let client = reqwest::Client::new();

    for path in ["/", "/containers", "/random"] {
        let response = client.post(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(response.status(), 404, "POST {}", path);
        assert_eq!(response.text().await.unwrap(), NOT_FOUND_TEMPLATE);
    }

    let response = client.delete(format!("{}/style.css", base)).send().await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn traversal_outside_the_root_is_refused() {
    let site = TestSite::new();
    // A file next to (not below) the static root. HTTP clients normalize
    // dot segments away, so speak raw HTTP to exercise the server's check.
    fs::write(site.dir.path().join("secret.txt"), "top secret").unwrap();
    let base = spawn_site(&site).await;
    let addr = base.strip_prefix("http://").unwrap().to_string();

    let mut stream = tokio::net::TcpStream::connect(&addr).await.unwrap();
    stream
        .write_all(b"GET /../secret.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8_lossy(&raw);

    assert!(raw.starts_with("HTTP/1.1 403"), "unexpected response: {raw}");
    assert!(!raw.contains("top secret"));
}

#[tokio::test]
async fn directory_paths_are_not_served() {
    let site = TestSite::new();
    let base = spawn_site(&site).await;

    let response = reqwest::get(format!("{}/images", base)).await.unwrap();
    assert_eq!(response.status(), 404);
}
