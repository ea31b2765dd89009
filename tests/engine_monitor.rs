// tests/engine_monitor.rs

mod common;
use crate::common::fake_backend::FakeProcessBackend;
use crate::common::init_tracing;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use mcpman::engine::{supervise, ConnectionMonitor, TransitionCause, HEARTBEAT_TIMEOUT};
use mcpman::exec::{launch, LaunchRequest, OutputEvent, ServerProcessHandle};
use mcpman::types::ConnectionStatus;

fn start(backend: &mut FakeProcessBackend) -> ServerProcessHandle {
    let request = LaunchRequest {
        identity: "srv".to_string(),
        command: "srv".to_string(),
        args: vec![],
        env: BTreeMap::new(),
        project_id: None,
    };
    launch(backend, request, Path::new("/ws")).unwrap()
}

fn causes(handle: &ServerProcessHandle) -> Vec<TransitionCause> {
    handle.transitions().iter().map(|c| c.cause).collect()
}

#[test]
fn launch_then_marker_connects() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();

    let launched = monitor.on_launch(t0).unwrap();
    assert_eq!(launched.from, ConnectionStatus::Disconnected);
    assert_eq!(launched.to, ConnectionStatus::Connecting);

    assert!(monitor.on_output("booting...", t0).is_none());
    assert_eq!(monitor.status(), ConnectionStatus::Connecting);

    let connected = monitor.on_output("Server started on stdio", t0).unwrap();
    assert_eq!(connected.to, ConnectionStatus::Connected);
    assert_eq!(monitor.last_heartbeat(), Some(t0));
}

#[test]
fn heartbeat_marker_refreshes_without_a_transition() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();
    monitor.on_launch(t0);
    monitor.on_output("Listening", t0);

    let later = t0 + Duration::from_secs(8);
    assert!(monitor.on_output("Listening again", later).is_none());
    assert_eq!(monitor.last_heartbeat(), Some(later));

    assert!(monitor.check_heartbeat(later + Duration::from_secs(9)).is_none());
}

#[test]
fn failure_marker_disconnects_from_any_state() {
    let t0 = Instant::now();

    let mut connecting = ConnectionMonitor::new();
    connecting.on_launch(t0);
    let change = connecting.on_output("Failed to bind", t0).unwrap();
    assert_eq!(change.cause, TransitionCause::FailureOutput);
    assert_eq!(connecting.status(), ConnectionStatus::Disconnected);

    let mut connected = ConnectionMonitor::new();
    connected.on_launch(t0);
    connected.on_output("Server started", t0);
    connected.on_output("Error: socket closed", t0);
    assert_eq!(connected.status(), ConnectionStatus::Disconnected);
}

#[test]
fn connected_marker_wins_over_failure_marker_in_one_chunk() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();
    monitor.on_launch(t0);

    monitor.on_output("Server started (Error reporting enabled)", t0);
    assert_eq!(monitor.status(), ConnectionStatus::Connected);
}

#[test]
fn heartbeat_timeout_is_strictly_greater_than_ten_seconds() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();
    monitor.on_launch(t0);
    monitor.on_output("Server started", t0);

    assert!(monitor.check_heartbeat(t0 + HEARTBEAT_TIMEOUT).is_none());
    assert_eq!(monitor.status(), ConnectionStatus::Connected);

    let change = monitor
        .check_heartbeat(t0 + HEARTBEAT_TIMEOUT + Duration::from_millis(1))
        .unwrap();
    assert_eq!(change.cause, TransitionCause::HeartbeatTimeout);
    assert_eq!(monitor.status(), ConnectionStatus::Disconnected);
}

#[test]
fn connecting_server_times_out_from_launch() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();
    monitor.on_launch(t0);

    let change = monitor.check_heartbeat(t0 + Duration::from_secs(11)).unwrap();
    assert_eq!(change.from, ConnectionStatus::Connecting);
    assert_eq!(change.to, ConnectionStatus::Disconnected);
}

#[test]
fn disconnected_monitor_ignores_heartbeat_checks() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();
    assert!(monitor.check_heartbeat(t0 + Duration::from_secs(60)).is_none());

    monitor.on_launch(t0);
    monitor.on_stop(t0);
    assert!(monitor.check_heartbeat(t0 + Duration::from_secs(60)).is_none());
}

#[test]
fn output_after_failure_can_reconnect() {
    let t0 = Instant::now();
    let mut monitor = ConnectionMonitor::new();
    monitor.on_launch(t0);
    monitor.on_output("Error: retrying", t0);

    let change = monitor.on_output("Listening on port 3000", t0).unwrap();
    assert_eq!(change.from, ConnectionStatus::Disconnected);
    assert_eq!(change.to, ConnectionStatus::Connected);
}

#[tokio::test(start_paused = true)]
async fn silent_connected_server_times_out_under_supervision() {
    init_tracing();
    let mut backend =
        FakeProcessBackend::with_script(vec![OutputEvent::stdout("Server started")]).keep_open();
    let mut handle = start(&mut backend);

    let status = supervise(&mut handle, sleep(Duration::from_secs(30))).await;

    assert_eq!(status, ConnectionStatus::Disconnected);
    assert_eq!(
        causes(&handle),
        vec![
            TransitionCause::Launched,
            TransitionCause::ConnectedOutput,
            TransitionCause::HeartbeatTimeout,
        ]
    );

    let transitions = handle.transitions();
    let connected_at = transitions[1].at;
    let timed_out_at = transitions[2].at;
    let elapsed = timed_out_at - connected_at;
    assert!(elapsed > HEARTBEAT_TIMEOUT, "timed out too early: {elapsed:?}");
    assert!(elapsed <= Duration::from_secs(15), "timed out too late: {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn regular_heartbeats_keep_the_server_connected() {
    let mut backend = FakeProcessBackend::new().keep_open();
    let mut handle = start(&mut backend);
    let sender = backend.last_sender().unwrap();

    tokio::spawn(async move {
        for _ in 0..5 {
            if sender.send(OutputEvent::stdout("Listening")).await.is_err() {
                break;
            }
            sleep(Duration::from_secs(4)).await;
        }
    });

    let status = supervise(&mut handle, sleep(Duration::from_secs(18))).await;

    assert_eq!(status, ConnectionStatus::Disconnected);
    assert_eq!(
        causes(&handle),
        vec![
            TransitionCause::Launched,
            TransitionCause::ConnectedOutput,
            TransitionCause::Stopped,
        ]
    );
}

#[tokio::test]
async fn closed_output_ends_the_run() {
    let mut backend = FakeProcessBackend::with_script(vec![
        OutputEvent::stderr("Listening on stdio"),
        OutputEvent::stderr("Error: upstream gone"),
    ]);
    let mut handle = start(&mut backend);

    let status = handle.run_until_exit().await;

    assert_eq!(status, ConnectionStatus::Disconnected);
    assert_eq!(
        causes(&handle),
        vec![
            TransitionCause::Launched,
            TransitionCause::ConnectedOutput,
            TransitionCause::FailureOutput,
        ]
    );
    assert!(!handle.is_active());
}

#[tokio::test]
async fn exit_without_failure_output_records_a_stop() {
    let mut backend = FakeProcessBackend::with_script(vec![OutputEvent::stdout("Server started")]);
    let mut handle = start(&mut backend);

    let status = supervise(&mut handle, std::future::pending()).await;

    assert_eq!(status, ConnectionStatus::Disconnected);
    assert_eq!(
        causes(&handle),
        vec![
            TransitionCause::Launched,
            TransitionCause::ConnectedOutput,
            TransitionCause::Stopped,
        ]
    );
}
