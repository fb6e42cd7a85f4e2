//! Application layer: setup and game orchestration
//!
//! This layer drives the domain structures and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod scenario;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use scenario::{RoomSpec, Scenario};
