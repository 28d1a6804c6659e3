//! Startup-to-settle behaviour of the feed model, driven headlessly.

use crimewatch::keys::Action;
use crimewatch::{FeedApp, Flags, Msg};
use crimewatch_core::testing::TestProgram;
use crimewatch_feed::{format_occurred, FeedMode, FetchError, OccurredAt, StaticSource};
use crimewatch_widgets::{EMPTY_MESSAGE, LOADING_MESSAGE};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

const SCENARIO_A: &str = r#"{"data":[{"OBJECTID":1,"Incident_Type":"Theft","Occurred_Datetime":"2024-01-01T10:00:00Z","Block_Address":"Block of Shattuck Ave","Case_Number":"24-0001"}]}"#;

fn program(status: u16, body: &str) -> TestProgram<FeedApp> {
    TestProgram::new(Flags::new(StaticSource::from_body(status, body)))
}

#[test]
fn loading_until_settled() {
    let prog = program(200, SCENARIO_A);
    assert!(prog.model().state().is_loading());
    assert!(prog.model().state().records().is_empty());

    let screen = prog.render_string(60, 20);
    assert!(screen.contains(LOADING_MESSAGE));
    assert!(!screen.contains(EMPTY_MESSAGE));
}

#[test]
fn init_issues_exactly_one_fetch() {
    let prog = program(200, SCENARIO_A);
    assert_eq!(prog.tasks_issued(), 1);
    assert_eq!(prog.pending_tasks(), 1);
}

#[tokio::test]
async fn scenario_a_single_record() {
    let mut prog = program(200, SCENARIO_A);
    prog.settle().await;

    let state = prog.model().state();
    assert!(!state.is_loading());
    assert_eq!(state.mode(), FeedMode::Populated);
    assert_eq!(state.records()[0].id, 1);

    let screen = prog.render_string(60, 20);
    let when = format_occurred(&OccurredAt::from("2024-01-01T10:00:00Z"));
    assert!(screen.contains("Recent Incidents (1)"));
    assert!(screen.contains("Theft"));
    assert!(screen.contains(&when));
    assert!(screen.contains("Block of Shattuck Ave"));
    assert!(screen.contains("Case #24-0001"));
    assert!(screen.contains("[▲ 1]"));
    assert!(screen.contains("[2 comments]"));
    assert!(!screen.contains(LOADING_MESSAGE));
    assert_eq!(prog.tasks_issued(), 1);
}

#[tokio::test]
async fn scenario_b_empty_result() {
    let mut prog = program(200, r#"{"data":[]}"#);
    prog.settle().await;

    assert_eq!(prog.model().state().mode(), FeedMode::Empty);
    assert_eq!(prog.model().state().diagnostic(), None);
    let screen = prog.render_string(60, 10);
    assert!(screen.contains(EMPTY_MESSAGE));
    assert!(!screen.contains(LOADING_MESSAGE));
}

#[tokio::test]
async fn scenario_c_server_error() {
    let mut prog = program(500, r#"{"error":"db down"}"#);
    prog.settle().await;

    let state = prog.model().state();
    assert_eq!(state.mode(), FeedMode::Empty);
    assert!(state.diagnostic().is_some_and(|d| d.contains("db down")));
    assert!(prog.render_string(60, 10).contains(EMPTY_MESSAGE));
}

/// In-memory log sink for asserting on `tracing` output.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn scenario_c_error_is_logged() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut prog = program(500, r#"{"error":"db down"}"#);
    prog.settle().await;

    let logs = capture.contents();
    assert!(logs.contains("ERROR"), "{logs}");
    assert!(logs.contains("failed to fetch incidents"), "{logs}");
    assert!(logs.contains("db down"), "{logs}");
}

#[tokio::test]
async fn scenario_d_malformed_json() {
    let mut prog = program(200, "{\"data\": [");
    prog.settle().await;

    let state = prog.model().state();
    assert!(!state.is_loading());
    assert_eq!(state.mode(), FeedMode::Empty);
    assert!(state.diagnostic().is_some());
}

#[tokio::test]
async fn transport_failure_looks_like_empty_result() {
    let mut failed = TestProgram::<FeedApp>::new(Flags::new(StaticSource::failing(
        FetchError::Transport("connection refused".into()),
    )));
    failed.settle().await;
    let mut empty = program(200, r#"{"data":[]}"#);
    empty.settle().await;

    assert_eq!(failed.render_string(60, 10), empty.render_string(60, 10));
}

#[tokio::test]
async fn records_keep_received_order() {
    let mut prog = program(
        200,
        r#"{"data":[{"OBJECTID":30},{"OBJECTID":10},{"OBJECTID":20}]}"#,
    );
    prog.settle().await;
    let ids: Vec<u64> = prog.model().state().records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[test]
fn abandoned_fetch_never_settles() {
    let mut prog = program(200, SCENARIO_A);
    assert_eq!(prog.abandon_pending(), 1);
    assert!(prog.model().state().is_loading());
    assert_eq!(prog.pending_tasks(), 0);
}

#[tokio::test]
async fn late_duplicate_result_is_ignored() {
    let mut prog = program(200, SCENARIO_A);
    prog.settle().await;
    prog.send(Msg::Settled(Err(FetchError::Status { status: 500 })));

    let state = prog.model().state();
    assert_eq!(state.records().len(), 1);
    assert_eq!(state.diagnostic(), None);
}

#[tokio::test]
async fn scrolling_is_clamped_to_records() {
    let mut prog = program(
        200,
        r#"{"data":[{"OBJECTID":1},{"OBJECTID":2},{"OBJECTID":3}]}"#,
    );
    prog.send(Msg::Key(Action::Down));
    assert_eq!(prog.model().offset(), 0, "no scrolling while loading");

    prog.settle().await;
    prog.send(Msg::Key(Action::Down));
    assert_eq!(prog.model().offset(), 1);
    prog.send(Msg::Key(Action::PageDown));
    assert_eq!(prog.model().offset(), 2);
    prog.send(Msg::Key(Action::Top));
    assert_eq!(prog.model().offset(), 0);
    prog.send(Msg::Key(Action::Up));
    assert_eq!(prog.model().offset(), 0);
    prog.send(Msg::Key(Action::Bottom));
    assert_eq!(prog.model().offset(), 2);
}

#[test]
fn quit_key_requests_exit() {
    let mut prog = program(200, SCENARIO_A);
    prog.send(Msg::Key(Action::Quit));
    assert!(prog.quit_requested());
}

#[tokio::test]
async fn spinner_subscription_only_while_loading() {
    use crimewatch_core::Model;

    let mut prog = program(200, r#"{"data":[]}"#);
    assert_eq!(prog.model().subscriptions().len(), 2);
    prog.settle().await;
    assert_eq!(prog.model().subscriptions().len(), 1);
}

#[tokio::test]
async fn bundled_fixture_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/incidents.json");
    let source = StaticSource::from_file(&path).unwrap();
    let mut prog = TestProgram::<FeedApp>::new(Flags::new(source));
    prog.settle().await;

    let state = prog.model().state();
    let ids: Vec<u64> = state.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 17, 23]);
    assert_eq!(state.records()[1].occurred, OccurredAt::EpochMillis(1_704_153_600_000));
    assert_eq!(
        state.records()[1].description.as_deref(),
        Some("Vehicle window smashed, bag taken")
    );
    assert_eq!(state.records()[1].statute_type.as_deref(), Some("PC"));
}
