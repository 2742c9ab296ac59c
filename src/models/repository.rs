use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RepoRootResponse {
    pub root: String,
    pub git_dir: String,
}
