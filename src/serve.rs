//! Local JSON API over the manifest and post files.
//!
//! Built on `tiny_http`, handling one request at a time in the main thread.
//! Every request reads the manifest and post files again; nothing is cached.
//!
//! | Route                    | Response                                      |
//! |--------------------------|-----------------------------------------------|
//! | `GET /api/posts?page=N`  | newest posts after N load steps + `has_more`  |
//! | `GET /api/posts/<slug>`  | post detail, 404 if unknown, 502 if body lost |
//! | `GET /content/<file>`    | raw post file                                 |
//! | `GET /data/<manifest>`   | the manifest JSON                             |

use crate::{
    config::SiteConfig,
    content,
    detail::{self, DetailError},
    listing, log,
    manifest::{Manifest, ManifestEntry},
    utils::slug::is_safe_slug,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{
    borrow::Cow,
    fs,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const JSON: &str = "application/json; charset=utf-8";
const MARKDOWN: &str = "text/markdown; charset=utf-8";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the API server. Blocks until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}/api/posts", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// A routed response, independent of the transport.
#[derive(Debug)]
struct ApiResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: JSON,
                body,
            },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: JSON,
            body: json!({ "error": message }).to_string(),
        }
    }

    fn not_found() -> Self {
        Self::error(404, "not found")
    }
}

/// Cumulative listing returned by `/api/posts`.
#[derive(Debug, Serialize)]
struct ListingResponse<'a> {
    posts: &'a [ManifestEntry],
    has_more: bool,
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let api = if *request.method() == Method::Get {
        route(request.url(), config)
    } else {
        ApiResponse::error(405, "method not allowed")
    };

    if api.status >= 400 {
        log!("serve"; "{} {} -> {}", request.method(), request.url(), api.status);
    }

    let header = Header::from_bytes("Content-Type", api.content_type)
        .map_err(|()| anyhow::anyhow!("invalid content type header"))?;
    let response = Response::from_string(api.body)
        .with_status_code(StatusCode(api.status))
        .with_header(header);

    request.respond(response)?;
    Ok(())
}

/// Resolve a GET request URL to a response.
fn route(url: &str, config: &SiteConfig) -> ApiResponse {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let path = urlencoding::decode(path)
        .map(Cow::into_owned)
        .unwrap_or_default();
    let path = path.trim_matches('/');

    match path.split_once('/') {
        Some(("api", "posts")) => list_posts(query, config),
        Some(("api", rest)) => match rest.strip_prefix("posts/") {
            Some(slug) => show_post(slug, config),
            None => ApiResponse::not_found(),
        },
        Some(("content", file)) => raw_post(file, config),
        Some(("data", file)) if file == config.build.manifest => manifest_file(config),
        _ => ApiResponse::not_found(),
    }
}

/// `GET /api/posts?page=N`
fn list_posts(query: &str, config: &SiteConfig) -> ApiResponse {
    let page = match query_param(query, "page").as_deref().map(str::parse::<usize>) {
        None => 1,
        Some(Ok(page)) if page >= 1 => page,
        Some(_) => return ApiResponse::error(400, "page must be a positive integer"),
    };

    let manifest = match Manifest::load(&config.build.manifest_path()) {
        Ok(manifest) => manifest,
        Err(e) => return ApiResponse::error(500, &format!("{e:#}")),
    };

    let sorted = manifest.sorted_by_date();
    let per_page = config.listing.per_page;
    ApiResponse::json(
        200,
        &ListingResponse {
            posts: listing::visible(&sorted, per_page, page),
            has_more: listing::has_more(&sorted, per_page, page),
        },
    )
}

/// `GET /api/posts/<slug>`
fn show_post(slug: &str, config: &SiteConfig) -> ApiResponse {
    match detail::load_post(config, slug) {
        Ok(post) => ApiResponse::json(200, &post),
        Err(e @ DetailError::NotFound(_)) => ApiResponse::error(404, &e.to_string()),
        Err(e @ DetailError::Body { .. }) => ApiResponse::error(502, &e.to_string()),
        Err(e @ DetailError::Manifest(_)) => {
            ApiResponse::error(500, &format!("{:#}", anyhow::Error::from(e)))
        }
    }
}

/// `GET /content/<slug>.<ext>`
fn raw_post(file: &str, config: &SiteConfig) -> ApiResponse {
    let ext = &config.build.extension;
    if file.contains(['/', '\\']) {
        return ApiResponse::not_found();
    }
    let Some(slug) = content::slug_of(std::path::Path::new(file), ext).filter(|s| is_safe_slug(s)) else {
        return ApiResponse::not_found();
    };

    match content::read_raw(&config.build.content, slug, ext) {
        Ok(body) => ApiResponse {
            status: 200,
            content_type: MARKDOWN,
            body,
        },
        Err(_) => ApiResponse::not_found(),
    }
}

/// `GET /data/<manifest>`
fn manifest_file(config: &SiteConfig) -> ApiResponse {
    match fs::read_to_string(config.build.manifest_path()) {
        Ok(body) => ApiResponse {
            status: 200,
            content_type: JSON,
            body,
        },
        Err(_) => ApiResponse::not_found(),
    }
}

/// Percent-decoded value of `key` in a `a=1&b=2` query string.
fn query_param(query: &str, key: &str) -> Option<String> {
    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(k, v)| (k == key).then_some(v))?;

    Some(
        urlencoding::decode(value)
            .map(Cow::into_owned)
            .unwrap_or_else(|_| value.to_owned()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn setup(count: usize) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().join("blog");
        config.build.data = dir.path().join("data");
        config.listing.per_page = 3;
        fs::create_dir_all(&config.build.content).unwrap();

        let entries = (0..count)
            .map(|i| {
                let slug = format!("post-{i}");
                fs::write(
                    config.build.content.join(format!("{slug}.md")),
                    format!("---\ntitle: Post {i}\n---\n\nBody {i}\n"),
                )
                .unwrap();
                ManifestEntry {
                    slug,
                    title: format!("Post {i}"),
                    date: format!("2024-01-{:02}", i + 1),
                    description: String::new(),
                }
            })
            .collect();
        Manifest::new(entries)
            .write(&config.build.manifest_path())
            .unwrap();
        (dir, config)
    }

    fn body(response: &ApiResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("page=2", "page").as_deref(), Some("2"));
        assert_eq!(query_param("a=1&page=3", "page").as_deref(), Some("3"));
        assert_eq!(query_param("page=%32", "page").as_deref(), Some("2"));
        assert_eq!(query_param("", "page"), None);
        assert_eq!(query_param("pages=3", "page"), None);
    }

    #[test]
    fn test_list_encoded_page() {
        let (_dir, config) = setup(7);
        let response = route("/api/posts?page=%32", &config);
        assert_eq!(response.status, 200);
        assert_eq!(body(&response)["posts"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_list_first_page_newest_first() {
        let (_dir, config) = setup(7);
        let response = route("/api/posts", &config);
        assert_eq!(response.status, 200);

        let json = body(&response);
        let posts = json["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0]["slug"], "post-6");
        assert_eq!(json["has_more"], true);
    }

    #[test]
    fn test_list_last_page() {
        let (_dir, config) = setup(7);
        let json = body(&route("/api/posts?page=3", &config));
        assert_eq!(json["posts"].as_array().unwrap().len(), 7);
        assert_eq!(json["has_more"], false);
    }

    #[test]
    fn test_list_invalid_page() {
        let (_dir, config) = setup(1);
        assert_eq!(route("/api/posts?page=0", &config).status, 400);
        assert_eq!(route("/api/posts?page=abc", &config).status, 400);
    }

    #[test]
    fn test_show_post() {
        let (_dir, config) = setup(3);
        let response = route("/api/posts/post-1", &config);
        assert_eq!(response.status, 200);

        let json = body(&response);
        assert_eq!(json["title"], "Post 1");
        assert_eq!(json["body"], "Body 1\n");
        assert_eq!(json["recommended"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_show_unknown_post_is_404() {
        let (_dir, config) = setup(1);
        let response = route("/api/posts/nope", &config);
        assert_eq!(response.status, 404);
        assert!(body(&response)["error"].as_str().unwrap().contains("not found"));
    }

    #[test]
    fn test_show_post_with_missing_body_is_502() {
        let (_dir, config) = setup(2);
        fs::remove_file(config.build.content.join("post-0.md")).unwrap();
        assert_eq!(route("/api/posts/post-0", &config).status, 502);
    }

    #[test]
    fn test_raw_post() {
        let (_dir, config) = setup(1);
        let response = route("/content/post-0.md", &config);
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, MARKDOWN);
        assert!(response.body.starts_with("---\ntitle: Post 0"));
    }

    #[test]
    fn test_raw_post_rejects_traversal() {
        let (_dir, config) = setup(1);
        assert_eq!(route("/content/..%2Fdata%2FblogPosts.md", &config).status, 404);
        assert_eq!(route("/content/.hidden.md", &config).status, 404);
        assert_eq!(route("/content/post-0.txt", &config).status, 404);
    }

    #[test]
    fn test_manifest_file() {
        let (_dir, config) = setup(2);
        let response = route("/data/blogPosts.json", &config);
        assert_eq!(response.status, 200);
        assert_eq!(body(&response).as_array().unwrap().len(), 2);

        assert_eq!(route("/data/other.json", &config).status, 404);
    }

    #[test]
    fn test_unknown_route() {
        let (_dir, config) = setup(0);
        assert_eq!(route("/", &config).status, 404);
        assert_eq!(route("/api", &config).status, 404);
        assert_eq!(route("/api/tags", &config).status, 404);
    }

    #[test]
    fn test_missing_manifest_is_500() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.data = dir.path().join("none");
        assert_eq!(route("/api/posts", &config).status, 500);
    }
}
