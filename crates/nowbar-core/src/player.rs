//! The seam between the core state machine and the host
//! automation mechanism.
//!
//! Two operations cover the entire external surface: one read (the track
//! query) and one write (a transport verb).  The scheduler, parser, and
//! reducer only ever see this trait, so tests drive them with a fake
//! channel instead of a real `osascript` invocation.

use std::future::Future;

use crate::track::TransportCommand;

pub trait PlayerChannel: Send + Sync + 'static {
    /// Issue one track query.  Returns the raw delimited response, or an
    /// empty string when the player is not running.  An `Err` is a channel
    /// failure (the automation call itself broke); callers surface it as
    /// "unavailable" for that cycle and let the next tick self-heal.
    fn query_track(&self) -> impl Future<Output = anyhow::Result<String>> + Send;

    /// Send one transport verb, fire-and-forget.  The channel offers no
    /// success confirmation; correctness is deferred to the next refresh.
    fn send_command(
        &self,
        command: TransportCommand,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
