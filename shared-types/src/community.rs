use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A link shared through the community submission sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommunityPost {
    pub url: String,
    pub title: String,
    pub notes: String,
    pub tag: String,
    pub status: String,
}

impl CommunityPost {
    /// Only approved posts with a link are shown
    pub fn is_publishable(&self) -> bool {
        !self.url.is_empty() && self.status == "approved"
    }
}

/// Response for the community feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
    pub posts: Vec<CommunityPost>,
}
