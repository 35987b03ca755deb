// Crate root: extended-link resolution and calculation validation for XBRL
// linkbases. With the `python` feature this also defines the `_core`
// Python module.

pub mod analysis;
pub mod assembly;
pub mod config;
pub mod factory;
pub mod graph;
pub mod linkbase;
pub mod resolve;
pub mod store;
pub mod updater;
pub mod validation;

#[cfg(feature = "python")]
mod bindings;

pub use assembly::{validate_components, Assembler, AssemblyReport, Component, Filing, RoleResolver, StaticRoleResolver};
pub use config::{Config, ErrorPolicy, ValidationMode};
pub use graph::{merge, Network, NetworkNode, TreeNode};
pub use linkbase::{Edge, Endpoint, ExtendedLink, LinkKind};
pub use resolve::{ResolveError, Resolver};
pub use store::{Fact, FactSet, QName, ReportElement, ReportElementTable};
pub use validation::{CalculationReport, CalculationValidator};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A simple function to confirm the Rust core is callable from Python.
#[cfg(feature = "python")]
#[pyfunction]
fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// --- Module Definition ---
/// Defines the `_core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::python::resolve_filing_json, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::python::validate_filing_json, m)?)?;
    m.add_class::<bindings::python::PyFiling>()?;
    Ok(())
}
