use serde::{Deserialize, Serialize};

/// Stored HubSpot credentials for the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HubspotAccessToken {
    pub hubspot_access_token: String,
}
