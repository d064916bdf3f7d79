//! Usage telemetry
//!
//! A one-way record of what was generated: the caller builds a
//! [`UsageRecord`] from the request and hands it to a [`UsageSink`].
//! Recording is independent of generation, and a failing sink never affects
//! the generated output.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{CodeGenerationRequest, ResponseType};

/// One generation call as seen by telemetry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Caller origin (client address, user name, "cli", ...)
    pub origin: String,
    /// When the request was handled
    pub timestamp: DateTime<Utc>,
    /// Names of the generated models, in request order
    pub generated_models: Vec<String>,
    /// Requested response type
    pub response_type: ResponseType,
    /// Roles used for policy generation (empty without authentication)
    pub roles: Vec<String>,
    /// Whether the authentication subsystem was generated
    pub jwt_included: bool,
}

impl UsageRecord {
    /// Build a record for a request, stamped with the current time
    pub fn from_request(origin: impl Into<String>, request: &CodeGenerationRequest) -> Self {
        Self::at(origin, request, Utc::now())
    }

    /// Build a record with an explicit timestamp
    pub fn at(
        origin: impl Into<String>,
        request: &CodeGenerationRequest,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let roles = if request.include_jwt_authentication {
            request.effective_roles()
        } else {
            Vec::new()
        };

        Self {
            origin: origin.into(),
            timestamp,
            generated_models: request.models.iter().map(|m| m.name.clone()).collect(),
            response_type: request.response_type,
            roles,
            jwt_included: request.include_jwt_authentication,
        }
    }
}

/// Destination for usage records
pub trait UsageSink: Send + Sync {
    /// Record one usage entry
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the record cannot be stored. Callers are
    /// expected to log and continue.
    fn record(&self, record: &UsageRecord) -> std::io::Result<()>;
}

/// Emits each record as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUsageSink;

impl UsageSink for TracingUsageSink {
    fn record(&self, record: &UsageRecord) -> std::io::Result<()> {
        tracing::info!(
            target: "crudgen::usage",
            origin = %record.origin,
            timestamp = %record.timestamp.to_rfc3339(),
            models = %record.generated_models.join(","),
            response_type = %record.response_type,
            roles = %record.roles.join(","),
            jwt_included = record.jwt_included,
            "code generation usage"
        );
        Ok(())
    }
}

/// Appends each record as one JSON object per line
#[derive(Debug)]
pub struct JsonLinesUsageSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesUsageSink {
    /// Create a sink writing to `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Log file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UsageSink for JsonLinesUsageSink {
    fn record(&self, record: &UsageRecord) -> std::io::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        // Serialize appends so concurrent records never interleave
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelDefinition;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn request() -> CodeGenerationRequest {
        CodeGenerationRequest::new("Shop")
            .model(ModelDefinition::new("Order"))
            .model(ModelDefinition::new("Customer"))
    }

    #[test]
    fn test_record_from_request() {
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 18, 50, 5).unwrap();
        let record = UsageRecord::at("127.0.0.1", &request(), at);

        assert_eq!(record.generated_models, vec!["Order", "Customer"]);
        assert_eq!(record.response_type, ResponseType::Text);
        assert!(record.roles.is_empty());
        assert!(!record.jwt_included);
    }

    #[test]
    fn test_record_uses_effective_roles() {
        let request = request().with_authentication(Vec::<String>::new());
        let record = UsageRecord::from_request("cli", &request);

        assert_eq!(record.roles, vec!["User"]);
        assert!(record.jwt_included);
    }

    #[test]
    fn test_json_lines_sink_appends() {
        let dir = tempdir().unwrap();
        let sink = JsonLinesUsageSink::new(dir.path().join("logs/usage.jsonl"));

        sink.record(&UsageRecord::from_request("a", &request())).unwrap();
        sink.record(&UsageRecord::from_request("b", &request())).unwrap();

        let text = std::fs::read_to_string(sink.path()).unwrap();
        let records: Vec<UsageRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].origin, "b");
        assert!(text.contains("\"generatedModels\":[\"Order\",\"Customer\"]"));
    }

    #[test]
    fn test_tracing_sink_never_fails() {
        assert!(TracingUsageSink
            .record(&UsageRecord::from_request("cli", &request()))
            .is_ok());
    }
}
