use crate::assembly::{validate_components, AssemblyReport, Filing};
use crate::config::Config;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde_json::json;

fn parse_config(config_json: Option<&str>) -> PyResult<Config> {
    match config_json {
        Some(text) => Config::from_json_str(text).map_err(|e| PyValueError::new_err(e.to_string())),
        None => Ok(Config::default()),
    }
}

fn report_json(report: &AssemblyReport, filing: &Filing) -> serde_json::Value {
    json!({
        "components": report.components().collect::<Vec<_>>(),
        "errors": report.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        "report_elements": &filing.report_elements,
    })
}

#[pyclass(name = "_Filing")]
#[derive(Debug, Clone, Default)]
pub struct PyFiling {
    inner: Filing,
    config: Config,
}

#[pymethods]
impl PyFiling {
    #[new]
    #[pyo3(signature = (json, config_json = None))]
    pub fn new(json: &str, config_json: Option<&str>) -> PyResult<Self> {
        let inner = Filing::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner, config: parse_config(config_json)? })
    }

    /// Resolves every fragment; returns components, collected errors and the
    /// rewritten report elements as JSON.
    pub fn resolve(&mut self) -> PyResult<String> {
        let report = self.inner.assemble(&self.config).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(report_json(&report, &self.inner).to_string())
    }

    /// Resolves, then validates every calculation network; returns the
    /// verdicts keyed by component id as JSON.
    pub fn validate(&mut self) -> PyResult<String> {
        let report = self.inner.assemble(&self.config).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        let verdicts = validate_components(
            &report,
            &self.inner.report_elements,
            &self.inner.fact_set(),
            self.config.validation_mode,
        );
        serde_json::to_string(&verdicts).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    pub fn link_count(&self) -> usize { self.inner.links.len() }

    pub fn report_element_count(&self) -> usize { self.inner.report_elements.count() }
}

#[pyfunction]
#[pyo3(signature = (json, config_json = None))]
pub fn resolve_filing_json(json: &str, config_json: Option<&str>) -> PyResult<String> {
    PyFiling::new(json, config_json)?.resolve()
}

#[pyfunction]
#[pyo3(signature = (json, config_json = None))]
pub fn validate_filing_json(json: &str, config_json: Option<&str>) -> PyResult<String> {
    PyFiling::new(json, config_json)?.validate()
}
