pub mod blame;
pub mod commit;
pub mod exec;
pub mod locator;
pub mod remote;
pub mod resolver;
pub mod revision;

pub use exec::{CliGit, GitExec};
pub use locator::{FsProbe, PathProbe, RepoRoot, RepositoryLocator};
pub use remote::{HostMatcher, LinkRule, LinkTable, RemoteDescriptor};
pub use resolver::LinkResolver;
pub use revision::{is_committed, strip_boundary};
