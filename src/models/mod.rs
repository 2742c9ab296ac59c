//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for HTTP and CLI consumers.
//! - `blame`: BlameLine, BlameData, BlameResponse, StatusLine
//! - `commit`: CommitInfo, CommitResponse, LinkResponse
//! - `repository`: RepoRootResponse

pub mod blame;
pub mod commit;
pub mod repository;

pub use blame::*;
pub use commit::*;
pub use repository::*;
