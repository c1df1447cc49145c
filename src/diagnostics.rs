//! Diagnostic reporting
//!
//! Every schema-validation failure and every classified error is reported
//! through a [`DiagnosticSink`] before it is stored on a cache entry, so that
//! a log aggregator or a test harness can observe the full context (endpoint,
//! issue list, raw payload) even though the entry itself only keeps the
//! normalized error.

use std::sync::Mutex;

use serde_json::Value;

use crate::api::EndpointKind;
use crate::error::ClassifiedError;
use crate::schema::ValidationFailure;

/// Observability sink for request failures
pub trait DiagnosticSink: Send + Sync {
    /// A payload parsed as JSON but failed shape validation.
    fn validation_failed(
        &self,
        endpoint: EndpointKind,
        failure: &ValidationFailure,
        raw_payload: &Value,
    );

    /// A transport/HTTP failure was classified.
    fn error_classified(&self, endpoint: EndpointKind, error: &ClassifiedError);
}

/// Default sink that forwards diagnostics to the `log` crate
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn validation_failed(
        &self,
        endpoint: EndpointKind,
        failure: &ValidationFailure,
        raw_payload: &Value,
    ) {
        log::error!(
            "schema validation failed for {endpoint}: {} issue(s)",
            failure.issues.len()
        );
        for issue in &failure.issues {
            match &issue.found {
                Some(found) => log::error!("  {}: {} (got {})", issue.path, issue.message, found),
                None => log::error!("  {}: {}", issue.path, issue.message),
            }
        }
        log::debug!("offending payload for {endpoint}: {raw_payload}");
    }

    fn error_classified(&self, endpoint: EndpointKind, error: &ClassifiedError) {
        log::warn!(
            "request to {endpoint} failed: {:?}: {}",
            error.kind,
            error.message
        );
    }
}

/// Recorded diagnostic event, for assertions in tests
#[derive(Debug, Clone)]
pub enum DiagnosticEvent {
    ValidationFailed {
        endpoint: EndpointKind,
        failure: ValidationFailure,
        raw_payload: Value,
    },
    ErrorClassified {
        endpoint: EndpointKind,
        error: ClassifiedError,
    },
}

/// Sink that records every event in memory
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, in order
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CapturingSink {
    fn validation_failed(
        &self,
        endpoint: EndpointKind,
        failure: &ValidationFailure,
        raw_payload: &Value,
    ) {
        if let Ok(mut events) = self.events.lock() {
            events.push(DiagnosticEvent::ValidationFailed {
                endpoint,
                failure: failure.clone(),
                raw_payload: raw_payload.clone(),
            });
        }
    }

    fn error_classified(&self, endpoint: EndpointKind, error: &ClassifiedError) {
        if let Ok(mut events) = self.events.lock() {
            events.push(DiagnosticEvent::ErrorClassified {
                endpoint,
                error: error.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{classify, TransportFailure};

    #[test]
    fn test_capturing_sink_records_classifications() {
        let sink = CapturingSink::new();
        let error = classify(&TransportFailure::Timeout);

        sink.error_classified(EndpointKind::Popular, &error);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DiagnosticEvent::ErrorClassified { endpoint, error } => {
                assert_eq!(*endpoint, EndpointKind::Popular);
                assert_eq!(error.kind, crate::error::ErrorKind::Network);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_capturing_sink_records_validation_failures() {
        use crate::schema::{validate, SchemaId};

        let sink = CapturingSink::new();
        let raw = serde_json::json!({"page": 1});
        let failure = validate(SchemaId::MovieList, &raw).expect_err("should fail");

        sink.validation_failed(EndpointKind::Search, &failure, &raw);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DiagnosticEvent::ValidationFailed {
                endpoint, failure, ..
            } => {
                assert_eq!(*endpoint, EndpointKind::Search);
                assert!(!failure.issues.is_empty());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
