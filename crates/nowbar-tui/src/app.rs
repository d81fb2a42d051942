//! The single event loop owning the ViewState.
//!
//! Architecture:
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks (keyboard reader, refresh tasks, the one-shot refresh timer).
//! - Two timer sources converge on the same refresh path: the periodic
//!   poll interval, and a one-shot "refresh soon" armed after every
//!   transport command so the display converges without waiting a full
//!   poll period.
//! - Each refresh is an independent spawned task: query → parse → one
//!   snapshot event.  Overlapping refreshes are fine; events apply in
//!   arrival order and the last write wins.
//! - The ViewState is replaced, never mutated: `reduce(event, &previous)`.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use nowbar_core::config::Config;
use nowbar_core::player::PlayerChannel;
use nowbar_core::state::{reduce, TrackEvent, ViewState};
use nowbar_core::track::{parse_snapshot, TransportCommand};

use crate::widgets::now_playing;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    /// Terminal input.
    Event(Event),
    /// A refresh cycle completed.
    Track(TrackEvent),
    /// A transport command finished sending; arm the accelerated refresh.
    CommandSent,
    /// The accelerated-refresh delay elapsed.
    RefreshSoon,
}

pub struct App<C: PlayerChannel> {
    channel: Arc<C>,
    config: Config,
    state: ViewState,
    /// The pending accelerated-refresh timer, if armed.  Re-arming aborts
    /// it first, so rapid commands coalesce into one re-query.
    refresh_soon: Option<tokio::task::AbortHandle>,
    should_quit: bool,
}

impl<C: PlayerChannel> App<C> {
    pub fn new(config: Config, channel: C) -> Self {
        Self {
            channel: Arc::new(channel),
            config,
            state: ViewState::initial(),
            refresh_soon: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(64);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Periodic poll timer ───────────────────────────────────────────────
        // The first tick fires immediately and doubles as the startup refresh.
        let mut poll_tick =
            tokio::time::interval(Duration::from_millis(self.config.polling.refresh_ms.max(1)));
        poll_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("nowbar event loop started");

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| {
                    let area = f.area();
                    now_playing::draw(f, area, &self.state);
                })?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg, &tx);
                }

                _ = poll_tick.tick() => {
                    self.spawn_refresh(tx.clone());
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handling ──────────────────────────────────────────────────────

    /// Returns true when the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage, tx: &mpsc::Sender<AppMessage>) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key, tx)
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,

            AppMessage::Track(event) => {
                let next = reduce(&event, &self.state);
                let changed = next != self.state;
                self.state = next;
                changed
            }

            AppMessage::CommandSent => {
                self.arm_refresh_soon(tx);
                false
            }

            AppMessage::RefreshSoon => {
                self.refresh_soon = None;
                self.spawn_refresh(tx.clone());
                false
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppMessage>) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Mirror of the widget's play/pause toggle: pause while
                // playing, play otherwise.
                let verb = if self.state.playing {
                    TransportCommand::Pause
                } else {
                    TransportCommand::Play
                };
                self.dispatch(verb, tx);
            }
            KeyCode::Char('n') => self.dispatch(TransportCommand::NextTrack, tx),
            KeyCode::Char('p') => self.dispatch(TransportCommand::PreviousTrack, tx),
            KeyCode::Char('r') => self.spawn_refresh(tx.clone()),
            _ => {}
        }
        false
    }

    // ── Dispatcher ────────────────────────────────────────────────────────────

    /// Fire-and-forget transport command.  The channel gives no success
    /// confirmation; once the send completes (either way) the accelerated
    /// refresh is armed and the next read settles the display.
    fn dispatch(&mut self, command: TransportCommand, tx: &mpsc::Sender<AppMessage>) {
        info!("dispatch: {:?}", command);
        let channel = Arc::clone(&self.channel);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = channel.send_command(command).await {
                warn!("transport command {:?} failed: {:#}", command, e);
            }
            let _ = tx.send(AppMessage::CommandSent).await;
        });
    }

    /// Arm the one-shot accelerated refresh, replacing any pending timer.
    fn arm_refresh_soon(&mut self, tx: &mpsc::Sender<AppMessage>) {
        if let Some(pending) = self.refresh_soon.take() {
            pending.abort();
        }
        let delay = Duration::from_millis(self.config.polling.refresh_soon_ms);
        let tx = tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppMessage::RefreshSoon).await;
        });
        self.refresh_soon = Some(handle.abort_handle());
    }

    // ── Scheduler entry point ─────────────────────────────────────────────────

    /// One refresh cycle: query the player, parse, emit exactly one
    /// snapshot event.  Every failure degrades to "unavailable"; nothing
    /// here is fatal, and the next tick self-heals.
    fn spawn_refresh(&self, tx: mpsc::Sender<AppMessage>) {
        let channel = Arc::clone(&self.channel);
        tokio::spawn(async move {
            let event = match channel.query_track().await {
                Ok(raw) => match parse_snapshot(&raw) {
                    Ok(snapshot) => TrackEvent::Snapshot(snapshot),
                    Err(e) => {
                        debug!("treating response as unavailable: {}", e);
                        TrackEvent::Snapshot(None)
                    }
                },
                Err(e) => {
                    warn!("player query failed: {:#}", e);
                    TrackEvent::Snapshot(None)
                }
            };
            let _ = tx.send(AppMessage::Track(event)).await;
        });
    }
}
