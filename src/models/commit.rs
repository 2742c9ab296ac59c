use serde::{Deserialize, Serialize};

/// Author and message of a single commit, as shown in the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub email: String,
    pub author: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitResponse {
    pub revision: String,
    #[serde(flatten)]
    pub commit: CommitInfo,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub revision: String,
    pub url: String,
}
