//! Tests for the game session and its background hints.

use gebeta::{GameSession, HintError, HintProvider, HintStatus, Suggestion};
use gebeta_rules::{HintRequest, HintResponse, MoveError, Phase, Pit, Player, Severity, Variant};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Answers with a fixed hole after an optional delay.
struct StubProvider {
    hole: usize,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubProvider {
    fn new(hole: usize, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            hole,
            delay,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl HintProvider for StubProvider {
    async fn suggest(&self, _request: &HintRequest) -> Result<HintResponse, HintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(HintResponse {
            suggested_hole: self.hole,
            confidence: 0.8,
            reasoning: "stub".to_string(),
        })
    }
}

/// Always fails.
struct DownProvider;

#[async_trait::async_trait]
impl HintProvider for DownProvider {
    async fn suggest(&self, _request: &HintRequest) -> Result<HintResponse, HintError> {
        Err(HintError::new("Hint request failed: connection refused".to_string()))
    }
}

fn session_with(provider: Arc<dyn HintProvider>, timeout: Duration) -> GameSession {
    GameSession::new(Some(provider), timeout)
}

#[tokio::test]
async fn test_hint_for_live_position() {
    let mut session = session_with(StubProvider::new(3, Duration::ZERO), Duration::from_secs(1));
    session.start(Variant::TwelveHole);
    session.play(0, 0).expect("Opening move is legal");

    session.request_hint().expect("Hint request should start");
    match session.wait_hint().await {
        HintStatus::Ready(suggestion) => {
            assert_eq!(suggestion, Suggestion::new(Pit::new(1, 3), 0.8, "stub".to_string()));
        }
        other => panic!("Expected a suggestion, got {:?}", other),
    }
    assert!(matches!(session.poll_hint(), HintStatus::Idle));
}

#[tokio::test]
async fn test_hint_for_outdated_position_is_stale() {
    let mut session = session_with(StubProvider::new(3, Duration::from_millis(50)), Duration::from_secs(1));
    session.start(Variant::TwelveHole);

    session.request_hint().expect("Hint request should start");
    assert!(matches!(session.poll_hint(), HintStatus::Pending));

    session.play(0, 0).expect("Opening move is legal");
    assert!(matches!(session.wait_hint().await, HintStatus::Stale));
    assert_eq!(session.state().current_player(), Player::Second);
}

#[tokio::test]
async fn test_failed_hint_leaves_game_alone() {
    let mut session = session_with(Arc::new(DownProvider), Duration::from_secs(1));
    session.start(Variant::TwelveHole);
    let before = session.state().clone();

    session.request_hint().expect("Hint request should start");
    match session.wait_hint().await {
        HintStatus::Failed(err) => assert!(err.message.contains("connection refused")),
        other => panic!("Expected a failure, got {:?}", other),
    }
    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn test_slow_hint_times_out() {
    let mut session = session_with(StubProvider::new(1, Duration::from_millis(500)), Duration::from_millis(20));
    session.start(Variant::TwelveHole);

    session.request_hint().expect("Hint request should start");
    match session.wait_hint().await {
        HintStatus::Failed(err) => assert!(err.message.contains("timed out")),
        other => panic!("Expected a timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_off_board_suggestion_is_rejected() {
    let mut session = session_with(StubProvider::new(6, Duration::ZERO), Duration::from_secs(1));
    session.start(Variant::TwelveHole);

    session.request_hint().expect("Hint request should start");
    assert!(matches!(session.wait_hint().await, HintStatus::Failed(_)));
}

#[tokio::test]
async fn test_new_request_replaces_pending_one() {
    let provider = StubProvider::new(2, Duration::from_millis(20));
    let mut session = session_with(provider.clone(), Duration::from_secs(1));
    session.start(Variant::TwelveHole);

    session.request_hint().expect("First request should start");
    session.request_hint().expect("Second request should start");
    assert!(matches!(session.wait_hint().await, HintStatus::Ready(_)));
    assert!(matches!(session.poll_hint(), HintStatus::Idle));
    // The first task was aborted before it ever ran.
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_restart_drops_pending_hint() {
    let mut session = session_with(StubProvider::new(2, Duration::from_millis(50)), Duration::from_secs(1));
    session.start(Variant::TwelveHole);
    session.request_hint().expect("Hint request should start");

    session.start(Variant::EighteenHole);
    assert!(matches!(session.poll_hint(), HintStatus::Idle));
    assert!(matches!(session.state().phase(), Phase::Race(_)));
}

#[tokio::test]
async fn test_hints_need_a_provider_and_a_game() {
    let mut session = GameSession::new(None, Duration::from_secs(1));
    session.start(Variant::TwelveHole);
    assert!(session.request_hint().is_err());

    let mut session = session_with(StubProvider::new(0, Duration::ZERO), Duration::from_secs(1));
    assert!(session.request_hint().is_err());
    session.start(Variant::EighteenHole);
    assert!(session.request_hint().is_err());
}

#[tokio::test]
async fn test_no_hint_while_relay_is_pending() {
    let provider = StubProvider::new(0, Duration::ZERO);
    let mut session = session_with(provider.clone(), Duration::from_secs(1));
    session.start(Variant::EighteenHole);
    session.play(0, 0).expect("Race move is legal");
    session.play(2, 5).expect("Race move is legal");
    assert_eq!(session.state().current_player(), Player::Second);

    // Three seeds from (2, 0) end on the occupied (2, 3).
    let state = session.play(2, 0).expect("Opening move is legal");
    assert_eq!(state.relay_origin(), Some(Pit::new(2, 3)));

    let err = session.request_hint().unwrap_err();
    assert!(err.message.contains("(2, 3)"));
    assert!(matches!(session.poll_hint(), HintStatus::Idle));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_rejected_move_keeps_state() {
    let mut session = GameSession::new(None, Duration::from_secs(1));
    assert_eq!(session.play(0, 0).unwrap_err(), MoveError::NotStarted);

    session.start(Variant::TwelveHole);
    let err = session.play(1, 0).unwrap_err();
    assert_eq!(err.severity(), Severity::Blocking);
    assert_eq!(session.state().current_player(), Player::First);
}

#[test]
fn test_reset_reports_what_was_discarded() {
    let mut session = GameSession::new(None, Duration::from_secs(1));
    assert_eq!(session.reset().severity, Severity::Info);

    session.start(Variant::TwelveHole);
    let notice = session.reset();
    assert_eq!(notice.severity, Severity::Advisory);
    assert_eq!(session.state().phase(), &Phase::Setup);
}
