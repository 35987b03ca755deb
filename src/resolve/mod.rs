//! Resolution of extended links into networks.

mod error;
mod resolver;

pub use error::{ErrorClass, ResolveError, Result};
pub use resolver::Resolver;
