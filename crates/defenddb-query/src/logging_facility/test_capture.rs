//! Test capture mode for deterministic logging assertions
//!
//! Records every builder event in memory, flattened to string fields, so
//! tests can look events up by operation, event name or any field value.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use defenddb_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_event(event: &Event<'_>) -> Self {
        let mut fields = FieldMap::default();
        event.record(&mut fields);
        let fields = fields.0;
        Self {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// True if this is `event` emitted by `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

/// Field values as text; strings keep their raw form, the rest use `Debug`
#[derive(Default)]
struct FieldMap(HashMap<String, String>);

impl Visit for FieldMap {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer appending every event to a shared log
pub struct CaptureLayer {
    log: EventLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let captured = CapturedEvent::from_event(event);
        if let Ok(mut log) = self.log.lock() {
            log.push(captured);
        }
    }
}

/// Handle for reading the shared event log
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    /// Create a layer and the handle that reads what it records
    pub fn pair() -> (CaptureLayer, TestCapture) {
        let log = EventLog::default();
        (CaptureLayer { log: log.clone() }, TestCapture { log })
    }

    /// Snapshot of all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// First event matching `predicate`
    pub fn find<F>(&self, predicate: F) -> Option<CapturedEvent>
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().into_iter().find(|e| predicate(e))
    }

    /// Count events matching `predicate`
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Assert that `op` emitted `event` at least once
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let total = self.count_events(|_| true);
        if self.find(|e| e.is(op, event)).is_none() {
            panic!(
                "Expected event op={} event={} among {} captured events",
                op, event, total
            );
        }
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// Installs the capture layer as the global subscriber on first call and
/// returns a handle to the shared event log. Tests in one binary share the
/// log, so filter on fields unique to the test.
///
/// # Example
///
/// ```
/// use defenddb_query::logging_facility::test_capture::init_test_capture;
/// use defenddb_query::log_clause;
///
/// let capture = init_test_capture();
/// log_clause!("select_all");
/// capture.assert_event_exists("select_all", "clause");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCapture::pair();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_event() -> CapturedEvent {
        let mut fields = HashMap::new();
        fields.insert("err.code".to_string(), "ERR_INVALID_VALUE".to_string());
        CapturedEvent {
            level: Level::WARN,
            component: Some("defenddb_query::builder".to_string()),
            op: Some("equals_to".to_string()),
            event: Some("reject".to_string()),
            fields,
        }
    }

    #[test]
    fn test_captured_event_field_lookup() {
        let event = reject_event();
        assert_eq!(event.field("err.code"), Some("ERR_INVALID_VALUE"));
        assert_eq!(event.field("missing"), None);
    }

    #[test]
    fn test_captured_event_matches_op_and_event() {
        let event = reject_event();
        assert!(event.is("equals_to", "reject"));
        assert!(!event.is("equals_to", "build"));
        assert!(!event.is("from_table", "reject"));
    }

    #[test]
    fn test_detached_pair_starts_empty() {
        let (_layer, capture) = TestCapture::pair();
        assert!(capture.events().is_empty());
        assert!(capture.find(|_| true).is_none());
        capture.clear();
        assert_eq!(capture.count_events(|_| true), 0);
    }
}
