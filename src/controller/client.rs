use crate::controller::{ApiResponse, Authenticator, Collection, Controller};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use serde_json::{json, Value};
use std::time::Duration;

const REGION_HEADER: &str = "x-redirect-region";
const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub controller: String,
    pub insecure: bool,
    pub ignore_region: bool,
    pub timeout: Duration,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    ignore_region: bool,
    token: Option<String>,
    tenant_id: Option<String>,
}

/// Rewrites `https://api.<domain>` (or an already regional
/// `https://api-<old>.<domain>`) to `https://api-<region>.<domain>`.
/// Any other host is returned unchanged.
pub fn region_url(base: &str, region: &str) -> String {
    let Ok(mut url) = Url::parse(base) else {
        return base.to_string();
    };
    let Some(host) = url.host_str() else {
        return base.to_string();
    };
    let domain = host.strip_prefix("api.").or_else(|| {
        host.strip_prefix("api-")
            .and_then(|rest| rest.split_once('.'))
            .map(|(_, domain)| domain)
    });
    let Some(domain) = domain else {
        return base.to_string();
    };
    let regional = format!("api-{}.{}", region, domain);
    if url.set_host(Some(&regional)).is_err() {
        return base.to_string();
    }
    url.as_str().trim_end_matches('/').to_string()
}

fn read_response(resp: Response) -> anyhow::Result<ApiResponse> {
    let status = resp.status().as_u16();
    let text = resp.text()?;
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(&text) {
            Ok(v) => v,
            Err(_) => Value::String(text),
        }
    };
    Ok(ApiResponse::new(status, body))
}

impl ApiClient {
    pub fn new(opts: &ClientOptions) -> anyhow::Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(opts.insecure)
            .timeout(opts.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: opts.controller.trim_end_matches('/').to_string(),
            ignore_region: opts.ignore_region,
            token: None,
            tenant_id: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), url, "controller request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    fn follow_region(&mut self, headers: &HeaderMap) {
        let Some(region) = headers
            .get(REGION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|r| !r.is_empty())
        else {
            return;
        };
        if self.ignore_region {
            tracing::info!(region, "ignoring region redirect");
            return;
        }
        let redirected = region_url(&self.base_url, region);
        if redirected != self.base_url {
            tracing::info!(from = %self.base_url, to = %redirected, "following region redirect");
            self.base_url = redirected;
        }
    }

    fn load_profile(&mut self) -> anyhow::Result<bool> {
        let url = format!("{}/v2.0/api/profile", self.base_url);
        let resp = self.request(Method::GET, &url).send()?;
        let headers = resp.headers().clone();
        let profile = read_response(resp)?;
        tracing::debug!(status = profile.status, "profile lookup");
        if !profile.is_success() {
            self.tenant_id = None;
            return Ok(false);
        }
        self.follow_region(&headers);
        self.tenant_id = profile
            .body
            .get("tenant_id")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(self.tenant_id.is_some())
    }

    fn collection_url(&self, collection: &Collection) -> anyhow::Result<String> {
        let Some(tenant) = &self.tenant_id else {
            anyhow::bail!("not logged in");
        };
        Ok(format!(
            "{}/{}/api/tenants/{}/{}",
            self.base_url,
            collection.api_version(),
            tenant,
            collection.path()
        ))
    }
}

impl Authenticator for ApiClient {
    fn use_token(&mut self, token: &str) -> anyhow::Result<bool> {
        self.token = Some(token.to_string());
        self.load_profile()
    }

    fn login(&mut self, email: &str, password: &str) -> anyhow::Result<bool> {
        let url = format!("{}/v2.0/api/login", self.base_url);
        let resp = self
            .request(Method::POST, &url)
            .json(&json!({"email": email, "password": password}))
            .send()?;
        let headers = resp.headers().clone();
        let login = read_response(resp)?;
        if !login.is_success() {
            tracing::debug!(status = login.status, "login rejected");
            return Ok(false);
        }
        self.follow_region(&headers);
        if let Some(token) = login.body.get("x_auth_token").and_then(Value::as_str) {
            self.token = Some(token.to_string());
        }
        self.load_profile()
    }
}

impl Controller for ApiClient {
    fn list(&self, collection: &Collection) -> anyhow::Result<ApiResponse> {
        let url = self.collection_url(collection)?;
        let resp = read_response(self.request(Method::GET, &url).send()?)?;
        tracing::debug!(status = resp.status, "list {}", collection.path());
        Ok(resp)
    }

    fn update(
        &self,
        collection: &Collection,
        id: &str,
        body: &Value,
    ) -> anyhow::Result<ApiResponse> {
        let url = format!("{}/{}", self.collection_url(collection)?, id);
        let resp = read_response(self.request(Method::PUT, &url).json(body).send()?)?;
        tracing::debug!(status = resp.status, id, "update {}", collection.path());
        Ok(resp)
    }
}
