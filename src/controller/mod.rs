//! Controller access layer.
//!
//! ## Files
//! - `client.rs` — blocking HTTP client: login, token auth, region redirect.
//!
//! Processors only see the `Controller` trait, so they can run against the
//! real client or an in-memory double.

pub mod client;
#[cfg(test)]
pub mod fake;

use crate::domain::models::{ObjectKind, TaggableObject};
use crate::error::TaggerError;
use serde_json::Value;

/// A listable/updatable object collection on the controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    Sites,
    Elements,
    CircuitCategories,
    Interfaces { site_id: String, element_id: String },
}

impl Collection {
    /// Collection for a kind that needs no parent ids.
    pub fn flat(kind: ObjectKind) -> Option<Self> {
        match kind {
            ObjectKind::Sites => Some(Collection::Sites),
            ObjectKind::Elements => Some(Collection::Elements),
            ObjectKind::CircuitCategories => Some(Collection::CircuitCategories),
            ObjectKind::Interfaces => None,
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            Collection::Sites => "v4.5",
            Collection::Elements => "v2.2",
            Collection::CircuitCategories => "v2.0",
            Collection::Interfaces { .. } => "v4.7",
        }
    }

    /// Path below `/{version}/api/tenants/{tenant_id}/`.
    pub fn path(&self) -> String {
        match self {
            Collection::Sites => "sites".to_string(),
            Collection::Elements => "elements".to_string(),
            Collection::CircuitCategories => "waninterfacelabels".to_string(),
            Collection::Interfaces {
                site_id,
                element_id,
            } => format!("sites/{}/elements/{}/interfaces", site_id, element_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status plus body, for `ERROR:`/`WARNING:` follow-up lines.
    pub fn detail(&self) -> String {
        let body = serde_json::to_string_pretty(&self.body).unwrap_or_default();
        format!("status: {}\nbody: {}", self.status, body)
    }
}

pub trait Controller {
    fn list(&self, collection: &Collection) -> anyhow::Result<ApiResponse>;
    fn update(&self, collection: &Collection, id: &str, body: &Value)
        -> anyhow::Result<ApiResponse>;
}

/// Session setup. `Ok(false)` means the controller rejected the credentials.
pub trait Authenticator {
    fn use_token(&mut self, token: &str) -> anyhow::Result<bool>;
    fn login(&mut self, email: &str, password: &str) -> anyhow::Result<bool>;
}

/// Objects from a listing call. A 404 yields one empty placeholder object;
/// any other failure is fatal.
pub fn extract_items(
    response: anyhow::Result<ApiResponse>,
    label: &str,
) -> Result<Vec<TaggableObject>, TaggerError> {
    let response = response.map_err(|e| TaggerError::Listing {
        label: label.to_string(),
        detail: format!("{:#}", e),
    })?;

    if response.is_success() {
        if let Some(Value::Array(items)) = response.body.get("items") {
            return Ok(items
                .iter()
                .cloned()
                .map(TaggableObject::from_value)
                .collect());
        }
    }
    if response.status == 404 {
        return Ok(vec![TaggableObject::default()]);
    }
    Err(TaggerError::Listing {
        label: label.to_string(),
        detail: response.detail(),
    })
}
