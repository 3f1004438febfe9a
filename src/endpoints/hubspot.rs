//! HubSpot CRM connection.

use crate::client::{Access, MincaClient};
use crate::error::Result;
use crate::types::HubspotAccessToken;

impl MincaClient {
    /// `GET /hubspot/authorize`
    ///
    /// The payload is passed through untouched; it typically carries the
    /// provider's authorization URL.
    pub async fn hubspot_authorize(&self) -> Result<serde_json::Value> {
        self.get_json(Access::Authenticated, &["hubspot", "authorize"])
            .await
    }

    /// `POST /hubspot/callback?code=`
    pub async fn hubspot_callback(&self, code: &str) -> Result<serde_json::Value> {
        self.post_query(
            Access::Authenticated,
            &["hubspot", "callback"],
            &[("code", code)],
        )
        .await
    }

    /// `GET /hubspot/access-token`
    pub async fn hubspot_access_token(&self) -> Result<HubspotAccessToken> {
        self.get_json(Access::Authenticated, &["hubspot", "access-token"])
            .await
    }
}
