//! End-to-end refresh pipeline over a fake PlayerChannel:
//! channel → parser → snapshot event → reducer → next ViewState.
//!
//! This mirrors exactly what the app loop does per cycle, minus timers.

use std::sync::Mutex;

use nowbar_core::player::PlayerChannel;
use nowbar_core::state::{reduce, TrackEvent, ViewState};
use nowbar_core::track::{parse_snapshot, TransportCommand, SENTINEL};

struct FakeChannel {
    /// Raw responses returned by successive query calls (cycled).
    responses: Mutex<Vec<Result<String, String>>>,
    sent: Mutex<Vec<TransportCommand>>,
}

impl FakeChannel {
    fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl PlayerChannel for FakeChannel {
    async fn query_track(&self) -> anyhow::Result<String> {
        let mut responses = self.responses.lock().unwrap();
        match responses.remove(0) {
            Ok(raw) => Ok(raw),
            Err(msg) => Err(anyhow::anyhow!(msg)),
        }
    }

    async fn send_command(&self, command: TransportCommand) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(command);
        Ok(())
    }
}

/// One refresh cycle, exactly as the app loop performs it: a failed or
/// malformed read degrades to the unavailable event, never an error.
async fn refresh<C: PlayerChannel>(channel: &C, previous: &ViewState) -> ViewState {
    let event = match channel.query_track().await {
        Ok(raw) => match parse_snapshot(&raw) {
            Ok(snapshot) => TrackEvent::Snapshot(snapshot),
            Err(_) => TrackEvent::Snapshot(None),
        },
        Err(_) => TrackEvent::Snapshot(None),
    };
    reduce(&event, previous)
}

fn playing_response() -> String {
    let sep = SENTINEL.to_string();
    [
        "playing", "Song A", "Artist B", "Album C", "http://x", "200000", "100",
    ]
    .join(sep.as_str())
}

#[tokio::test]
async fn test_playing_response_renders_visible_state() {
    let channel = FakeChannel::new(vec![Ok(playing_response())]);
    let state = refresh(&channel, &ViewState::initial()).await;

    assert!(state.playing);
    assert_eq!(state.title, "Song A");
    assert_eq!(state.artist, "Artist B");
    assert!((state.position_ratio - 0.5).abs() < f64::EPSILON);
    assert!(!state.hidden());
}

#[tokio::test]
async fn test_empty_response_renders_hidden() {
    let channel = FakeChannel::new(vec![Ok(String::new())]);
    let state = refresh(&channel, &ViewState::initial()).await;

    assert!(!state.loading);
    assert!(!state.player_available);
    assert!(state.hidden());
}

#[tokio::test]
async fn test_channel_failure_degrades_then_self_heals() {
    let channel = FakeChannel::new(vec![
        Err("osascript: command not found".to_string()),
        Ok(playing_response()),
    ]);

    let after_failure = refresh(&channel, &ViewState::initial()).await;
    assert!(after_failure.hidden());

    let after_recovery = refresh(&channel, &after_failure).await;
    assert!(!after_recovery.hidden());
    assert_eq!(after_recovery.title, "Song A");
}

#[tokio::test]
async fn test_malformed_response_treated_as_unavailable() {
    let channel = FakeChannel::new(vec![Ok("playing⎖only⎖three".to_string())]);
    let state = refresh(&channel, &ViewState::initial()).await;
    assert!(state.hidden());
}

#[tokio::test]
async fn test_commands_reach_the_channel() {
    let channel = FakeChannel::new(vec![]);
    channel.send_command(TransportCommand::Pause).await.unwrap();
    channel
        .send_command(TransportCommand::NextTrack)
        .await
        .unwrap();

    let sent = channel.sent.lock().unwrap();
    assert_eq!(
        *sent,
        vec![TransportCommand::Pause, TransportCommand::NextTrack]
    );
}
