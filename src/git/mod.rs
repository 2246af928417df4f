//! git
//!
//! Local repository queries.
//!
//! # Architecture
//!
//! All git access goes through [`Git`], which shells out via a
//! [`CommandRunner`]. Production code uses [`ProcessRunner`]; tests script
//! responses with [`mock::MockRunner`].
//!
//! # Responsibilities
//!
//! - Listing remotes (`git remote -v`) for repository discovery
//! - Detecting the checked-out branch, without ever failing
//!
//! # Example
//!
//! ```no_run
//! use convoy::git::{BranchLookup, Git, ProcessRunner};
//!
//! let git = Git::new(ProcessRunner::new("."));
//! if let BranchLookup::Detected(branch) = git.current_branch() {
//!     println!("on {branch}");
//! }
//! ```

mod interface;
pub mod mock;
mod runner;

pub use interface::{BranchLookup, Git};
pub use runner::{CommandRunner, ProcessRunner, RunError};
