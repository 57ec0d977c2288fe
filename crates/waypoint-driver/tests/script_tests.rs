//! Drives a real Waypoint server with the scripted producer.
//!
//! Each test binds the observer on `127.0.0.1:0` and runs the script with
//! no delay between steps.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use tokio::net::TcpListener;
use waypoint_driver::{CANONICAL_JOURNEY, DriverError, JourneyClient, ScriptStep, run_script};
use waypoint_observer::{AppState, serve};
use waypoint_types::{
    JourneyEvent, JourneyType, Location, LoungeState, OverallState, TransportState,
};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn_server() -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let serve_state = Arc::clone(&state);
    tokio::spawn(async move {
        let _ = serve(listener, serve_state, std::future::pending()).await;
    });

    (state, addr)
}

/// A server whose `/event` always fails.
async fn spawn_failing_server() -> SocketAddr {
    let router = Router::new().route(
        "/event",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "engine offline") }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

fn client_for(addr: SocketAddr) -> JourneyClient {
    JourneyClient::new(&format!("http://{addr}"), TIMEOUT).unwrap()
}

#[tokio::test]
async fn test_canonical_journey_completes() {
    let (state, addr) = spawn_server().await;
    let client = client_for(addr);

    let report = run_script(&client, &CANONICAL_JOURNEY, Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(report.steps_completed, CANONICAL_JOURNEY.len());

    let last = report.final_state.unwrap();
    assert_eq!(last.journey_type, JourneyType::Arrival);
    assert_eq!(last.current_location, Location::BaggageClaim);
    assert_eq!(last.current_leg_index, 2);
    assert_eq!(last.connection_risk_score, 70);
    assert_eq!(last.transport_state, TransportState::DriverAssigned);
    assert_eq!(last.overall_state, OverallState::Active);

    assert_eq!(state.snapshot().await, last);
    assert_eq!(state.diagnostics().await.engine.boarding_window_minutes, 120);
}

#[tokio::test]
async fn test_script_replays_from_reset() {
    let (state, addr) = spawn_server().await;
    let client = client_for(addr);

    state.submit(&JourneyEvent::VipNoShow).await;

    let steps = [
        ScriptStep {
            event: "RESET",
            description: "start over",
        },
        ScriptStep {
            event: "VIP_ENTERED_TERMINAL",
            description: "arrive",
        },
        ScriptStep {
            event: "FACE_VERIFIED",
            description: "verify",
        },
    ];
    let report = run_script(&client, &steps, Duration::ZERO).await.unwrap();

    let last = report.final_state.unwrap();
    assert_eq!(last.current_location, Location::Lounge);
    assert_eq!(last.lounge_state, LoungeState::Active);
    assert_eq!(last.overall_state, OverallState::Active);
}

#[tokio::test]
async fn test_unreachable_server_aborts_first_step() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = run_script(&client, &CANONICAL_JOURNEY, Duration::ZERO)
        .await
        .unwrap_err();

    assert!(
        matches!(
            &err,
            DriverError::StepFailed { step: 1, event, source }
                if event == "RESET" && matches!(**source, DriverError::Http(_))
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_server_error_status_is_reported() {
    let addr = spawn_failing_server().await;
    let client = client_for(addr);

    let err = client.submit("RESET").await.unwrap_err();
    assert!(
        matches!(
            &err,
            DriverError::Status { status: 500, body } if body == "engine offline"
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_unknown_event_is_acknowledged() {
    let (_, addr) = spawn_server().await;
    let client = client_for(addr);

    let ack = client.submit("TELEPORT").await.unwrap();
    assert_eq!(ack.status, "ok");
    assert_eq!(ack.context.current_location, Location::Outside);
}
