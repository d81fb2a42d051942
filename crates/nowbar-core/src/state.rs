//! ViewState, the single source of truth driving the renderer, and the
//! pure reducer that folds snapshot events into it.
//!
//! There is exactly one ViewState at any time.  It is replaced, never
//! mutated in place: the app loop owns the current value and swaps it for
//! `reduce(event, &previous)` on every event.  Fields an event does not
//! touch carry over from the previous state.

use crate::track::TrackSnapshot;

/// The widget's full display state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// True until the first snapshot event arrives.
    pub loading: bool,
    /// False when the player process is not running.  Display fields may
    /// hold stale values; the renderer hides everything while false.
    pub player_available: bool,
    pub playing: bool,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: String,
    /// Elapsed fraction of the current track, [0, 1].
    pub position_ratio: f64,
}

impl ViewState {
    /// Process-start state: nothing known yet, render nothing.
    pub fn initial() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// True when the renderer should draw the empty placeholder.
    pub fn hidden(&self) -> bool {
        self.loading || !self.player_available
    }
}

/// Events flowing into the reducer.  Marked non-exhaustive so future event
/// kinds reduce as no-ops instead of breaking callers.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TrackEvent {
    /// One refresh cycle completed.  `None` = player unavailable (empty or
    /// malformed response, or the automation call itself failed).
    Snapshot(Option<TrackSnapshot>),
}

/// Fold one event into the previous state, producing the next state.
/// Pure and total: never fails, never touches anything but its arguments.
pub fn reduce(event: &TrackEvent, previous: &ViewState) -> ViewState {
    // The wildcard arm is unreachable until a second event kind exists, but
    // it fixes the policy: unknown events leave the state untouched.
    #[allow(unreachable_patterns)]
    match event {
        TrackEvent::Snapshot(None) => ViewState {
            loading: false,
            player_available: false,
            ..previous.clone()
        },
        TrackEvent::Snapshot(Some(snap)) => ViewState {
            loading: false,
            player_available: true,
            playing: snap.playing,
            title: snap.title.clone(),
            artist: snap.artist.clone(),
            album: snap.album.clone(),
            artwork_url: snap.artwork_url.clone(),
            position_ratio: snap.position_ratio,
        },
        // Unknown event kinds are a deliberate no-op.
        _ => previous.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> TrackSnapshot {
        TrackSnapshot {
            playing: true,
            title: "Song A".to_string(),
            artist: "Artist B".to_string(),
            album: "Album C".to_string(),
            artwork_url: "http://x".to_string(),
            position_ratio: 0.5,
        }
    }

    #[test]
    fn test_initial_state_hidden() {
        let state = ViewState::initial();
        assert!(state.loading);
        assert!(state.hidden());
    }

    #[test]
    fn test_reduce_snapshot_populates_state() {
        let state = reduce(
            &TrackEvent::Snapshot(Some(sample_snapshot())),
            &ViewState::initial(),
        );
        assert!(!state.loading);
        assert!(state.player_available);
        assert!(state.playing);
        assert_eq!(state.title, "Song A");
        assert_eq!(state.position_ratio, 0.5);
        assert!(!state.hidden());
    }

    #[test]
    fn test_reduce_unavailable_hides_without_resurrecting_fields() {
        let populated = reduce(
            &TrackEvent::Snapshot(Some(sample_snapshot())),
            &ViewState::initial(),
        );
        let state = reduce(&TrackEvent::Snapshot(None), &populated);
        assert!(!state.loading);
        assert!(!state.player_available);
        // Stale fields survive the replacement but the state renders hidden.
        assert_eq!(state.title, "Song A");
        assert!(state.hidden());
    }

    #[test]
    fn test_reduce_unavailable_from_initial_clears_loading() {
        let state = reduce(&TrackEvent::Snapshot(None), &ViewState::initial());
        assert!(!state.loading);
        assert!(!state.player_available);
    }

    #[test]
    fn test_reduce_idempotent_under_repeated_snapshot() {
        let event = TrackEvent::Snapshot(Some(sample_snapshot()));
        let once = reduce(&event, &ViewState::initial());
        let twice = reduce(&event, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reduce_does_not_mutate_previous() {
        let previous = ViewState::initial();
        let _ = reduce(&TrackEvent::Snapshot(Some(sample_snapshot())), &previous);
        assert!(previous.loading);
    }
}
