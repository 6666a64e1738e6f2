#![allow(clippy::unwrap_used, clippy::expect_used)]

use defenddb_query::grammar::Query;
use defenddb_query::logging_facility::test_capture::init_test_capture;
use defenddb_query::schema::{
    EVENT_BUILD, EVENT_CLAUSE, EVENT_REJECT, FIELD_COMMAND, FIELD_ERR_CODE, FIELD_ERR_DETAIL,
    FIELD_ERR_KIND, FIELD_ERR_MESSAGE, FIELD_KEYWORD, FIELD_LEN, FIELD_SEGMENTS,
};
use defenddb_query::{log_clause, log_reject, QueryBuilder, QueryError, TableName};
use tracing::Level;

// Tests in this binary share one capture, so each uses tokens no other
// test emits and filters on them.

#[test]
fn test_rejection_emits_single_warn_event() {
    let capture = init_test_capture();
    let token = "reject_unique_1;";

    let mut query = QueryBuilder::new();
    assert!(query.from_table(token).is_err());

    let events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| {
            e.event.as_deref() == Some(EVENT_REJECT)
                && e.field(FIELD_ERR_MESSAGE)
                    .is_some_and(|m| m.contains("reject_unique_1"))
        })
        .collect();

    assert_eq!(events.len(), 1, "Should have exactly one reject event");
    let event = &events[0];
    assert_eq!(event.level, Level::WARN);
    assert_eq!(event.op.as_deref(), Some("from_table"));
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_INVALID_TABLE_NAME"));
    assert_eq!(event.field(FIELD_ERR_KIND), Some("InvalidTableName"));
}

#[test]
fn test_rejection_detail_names_operation() {
    let capture = init_test_capture();

    let mut query = QueryBuilder::new();
    assert!(query.agent_get_hotfixes_command("op_unique_7x").is_err());

    let event = capture
        .find(|e| {
            e.event.as_deref() == Some(EVENT_REJECT)
                && e.field(FIELD_ERR_MESSAGE)
                    .is_some_and(|m| m.contains("op_unique_7x"))
        })
        .expect("Should have reject event");

    let detail = event.field(FIELD_ERR_DETAIL).unwrap();
    assert!(
        detail.starts_with("[ERR_INVALID_AGENT_ID] in operation 'agent_get_hotfixes_command'"),
        "unexpected detail: {}",
        detail
    );
    assert!(detail.contains("(token: \"op_unique_7x\")"));
}

#[test]
fn test_rejection_message_is_escaped() {
    let capture = init_test_capture();

    let mut query = QueryBuilder::new();
    assert!(query.equals_to("escape_unique_2\nforged").is_err());

    let event = capture
        .events()
        .into_iter()
        .find(|e| {
            e.field(FIELD_ERR_MESSAGE)
                .is_some_and(|m| m.contains("escape_unique_2"))
        })
        .expect("Should have reject event");

    let message = event.field(FIELD_ERR_MESSAGE).unwrap();
    assert!(!message.contains('\n'));
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_INVALID_VALUE"));
}

#[test]
fn test_build_event_reports_segments() {
    let capture = init_test_capture();

    let mut query = QueryBuilder::new();
    query
        .global()
        .select_all()
        .from_table("build_unique_3")
        .unwrap();
    let command = query.build();

    let event = capture
        .events()
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_BUILD)
                && e.field(FIELD_COMMAND) == Some(command.as_str())
        })
        .expect("Should have build event");

    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.field(FIELD_SEGMENTS), Some("3"));
    assert_eq!(event.field(FIELD_LEN), Some(command.len().to_string().as_str()));
}

#[test]
fn test_typed_build_event_reports_segments() {
    let capture = init_test_capture();

    let command = Query::new()
        .global()
        .select_all()
        .from_table(&TableName::new("typed_build_unique_4").unwrap())
        .build();

    let count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_BUILD) && e.field(FIELD_COMMAND) == Some(command.as_str())
    });
    assert_eq!(count, 1);
}

#[test]
fn test_log_clause_macro() {
    let capture = init_test_capture();
    let op_name = "clause_unique_5";

    log_clause!(op_name, keyword = "FROM");

    capture.assert_event_exists(op_name, EVENT_CLAUSE);
    let event = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .unwrap();
    assert_eq!(event.level, Level::TRACE);
    assert_eq!(event.field(FIELD_KEYWORD), Some("FROM"));
}

#[test]
fn test_log_reject_macro_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "reject_macro_unique_6";

    let err = QueryError::InvalidCommandName {
        command: "a.b".to_string(),
    };
    log_reject!(op_name, err, caller = "inventory");

    capture.assert_event_exists(op_name, EVENT_REJECT);
    let event = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .unwrap();
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_INVALID_COMMAND_NAME"));
    assert_eq!(event.field("caller"), Some("inventory"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_CLAUSE);
}
