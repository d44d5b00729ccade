//! Local Git repository discovery.
//!
//! When the repository coordinates or the current reference are not
//! configured, they are taken from the Git checkout containing the working
//! directory: owner and repository from the `origin` remote, the current
//! reference from `HEAD`.
//!
//! ```no_run
//! use std::path::Path;
//! use release_tickets::local::discover_repository;
//!
//! let local = discover_repository(Path::new(".")).expect("not in a GitHub checkout");
//! println!("{}/{}", local.origin().owner(), local.origin().repository());
//! ```

mod discovery;
mod error;
mod remote;

pub use discovery::{LocalRepository, discover_repository, discover_repository_with_remote};
pub use error::LocalDiscoveryError;
pub use remote::{GitHubOrigin, parse_github_remote};
