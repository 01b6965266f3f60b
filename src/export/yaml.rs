//! YAML export
//!
//! The snapshot rendered as YAML, preceded by a comment header.

use std::fmt::Write;

use super::envelope::ExportEnvelope;
use crate::error::{ReportError, ReportResult};

/// Serialize the envelope to YAML with a comment header
pub fn export_yaml(envelope: &ExportEnvelope) -> ReportResult<String> {
    let info = &envelope.export_info;
    let mut output = String::new();

    writeln!(output, "# {} Financial Data Export", info.product)
        .and_then(|_| writeln!(output, "# Generated: {}", info.generated_at.to_rfc3339()))
        .and_then(|_| writeln!(output, "# Export ID: {}", info.export_id))
        .and_then(|_| writeln!(output, "# App Version: {}", info.app_version))
        .and_then(|_| writeln!(output, "#"))
        .and_then(|_| writeln!(output, "# Keep it secure - it contains all your financial data."))
        .and_then(|_| writeln!(output))
        .map_err(|e| ReportError::Export(e.to_string()))?;

    let body = serde_yaml::to_string(envelope).map_err(|e| ReportError::Export(e.to_string()))?;
    output.push_str(&body);

    Ok(output)
}

/// Read a YAML export back (for verification)
pub fn import_yaml(yaml_str: &str) -> ReportResult<ExportEnvelope> {
    let envelope: ExportEnvelope =
        serde_yaml::from_str(yaml_str).map_err(|e| ReportError::Export(e.to_string()))?;

    envelope.validate().map_err(ReportError::Export)?;

    Ok(envelope)
}
