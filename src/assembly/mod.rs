//! Network assembly: fragments in, components out.
mod assembler;
mod component;
mod filing;

pub use assembler::{Assembler, AssemblyError, AssemblyReport};
pub use component::{Component, RoleResolver, RoleType, StaticRoleResolver};
pub use filing::{validate_components, Filing, LoadError};
