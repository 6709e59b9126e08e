// File: src/client/core.rs
use crate::client::error::{ApiError, FetchOutcome};
use crate::client::middleware::{DefaultHeadersLayer, DefaultHeadersService};
use crate::client::redirect::{FollowRedirectLayer, FollowRedirectService};
use crate::config::{Config, normalize_base_url};
use crate::model::{Category, Course, Item};

use anyhow::{Context, Result, anyhow};
use http::{HeaderValue, Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::auth::AddAuthorization;
use tower_layer::Layer;

pub const FAVORITE_COURSES_PATH: &str = "/api/v1/users/self/favorites/courses";

type HttpsClient = AddAuthorization<
    DefaultHeadersService<
        FollowRedirectService<
            Client<
                hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
                String,
            >,
        >,
    >,
>;

/// Raw answer from a GET: status plus the collected body.
#[derive(Debug)]
struct ApiResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// String form of a course `id`: numbers in decimal, strings verbatim.
/// `null` and other shapes are treated as absent.
pub fn course_id_string(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Bearer-authenticated client for the handful of Canvas endpoints we read.
#[derive(Clone, Debug)]
pub struct CanvasClient {
    base_url: String,
    http: HttpsClient,
}

impl CanvasClient {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(anyhow!("Canvas base URL is empty"));
        }
        base_url
            .parse::<Uri>()
            .with_context(|| format!("Invalid Canvas base URL '{}'", base_url))?;

        // AddAuthorization::bearer panics on values that are not valid headers.
        HeaderValue::from_str(&format!("Bearer {}", access_token))
            .context("Access token contains characters that cannot be sent in a header")?;

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            log::warn!("No valid system certificates found; HTTPS requests will fail.");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client = Client::builder(TokioExecutor::new()).build(https_connector);
        let with_redirects = FollowRedirectLayer::default().layer(http_client);
        let with_headers = DefaultHeadersLayer::default().layer(with_redirects);
        let http = AddAuthorization::bearer(with_headers, access_token);

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, &config.access_token)
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let uri: Uri = url
            .parse()
            .with_context(|| format!("Invalid request URL '{}'", url))?;
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(String::new())?;

        log::debug!("GET {}", path);
        let response = self
            .http
            .clone()
            .oneshot(request)
            .await
            .with_context(|| format!("GET {} failed", path))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .with_context(|| format!("Reading response body of {} failed", path))?
            .to_bytes()
            .to_vec();
        log::debug!("GET {} -> {} ({} bytes)", path, status, body.len());

        Ok(ApiResponse { status, body })
    }

    /// GETs `path` and decodes the body. Anything but 200 becomes an [`ApiError`].
    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self.get(path).await?;
        if response.status != StatusCode::OK {
            return Err(ApiError {
                status: response.status,
                path: path.to_string(),
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }
            .into());
        }
        serde_json::from_slice(&response.body)
            .with_context(|| format!("Response of {} is not valid JSON", path))
    }

    async fn get_json_array(&self, path: &str) -> Result<Vec<Value>> {
        match self.get_json(path).await? {
            Value::Array(values) => Ok(values),
            other => Err(anyhow!(
                "Expected a JSON array from {}, got {}",
                path,
                json_kind(&other)
            )),
        }
    }

    // --- BOOTSTRAP ---

    /// IDs of the user's favorited courses, in API order. Elements without
    /// an `id` are skipped. Errors are returned as-is for the caller to report.
    pub async fn get_favorite_course_ids(&self) -> Result<Vec<String>> {
        let courses = self.get_json_array(FAVORITE_COURSES_PATH).await?;
        Ok(courses.iter().filter_map(course_id_string).collect())
    }

    // --- REFRESH ---

    /// Course metadata. Callers usually recover with [`Course::fallback`].
    pub async fn get_course(&self, course_id: &str) -> FetchOutcome<Course> {
        let path = format!("/api/v1/courses/{}", course_id);
        self.get_json(&path)
            .await
            .map(|value| Course::from_json(course_id, &value))
            .into()
    }

    /// Unsorted items of one category for a course.
    pub async fn get_items(&self, course_id: &str, category: Category) -> FetchOutcome<Vec<Item>> {
        self.get_json_array(&category.endpoint(course_id))
            .await
            .map(|values| {
                values
                    .into_iter()
                    .map(|raw| Item::from_json(category, raw))
                    .collect()
            })
            .into()
    }

    pub async fn get_announcements(&self, course_id: &str) -> FetchOutcome<Vec<Item>> {
        self.get_items(course_id, Category::Announcements).await
    }

    pub async fn get_assignments(&self, course_id: &str) -> FetchOutcome<Vec<Item>> {
        self.get_items(course_id, Category::Assignments).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
