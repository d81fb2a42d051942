//! The real PlayerChannel, backed by `osascript`.
//!
//! One process spawn per operation, no retries, no connection state.  The
//! script guards every interaction with `if application ... is running`,
//! so a stopped or uninstalled player yields an empty response (query) or
//! a silent no-op (command) rather than an error.

use anyhow::Context;
use tokio::process::Command;

use nowbar_core::player::PlayerChannel;
use nowbar_core::track::{TransportCommand, SENTINEL};

pub struct OsaChannel {
    app_name: String,
}

impl OsaChannel {
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }

    /// Script asking the player for the 7 track fields joined by the
    /// sentinel, or "" when the app is not running.
    fn query_script(&self) -> String {
        let app = &self.app_name;
        format!(
            "set output to \"\"\n\
             if application \"{app}\" is running then\n\
             \ttell application \"{app}\"\n\
             \t\tset output to player state & \"{SENTINEL}\" & name of current track \
             & \"{SENTINEL}\" & artist of current track \
             & \"{SENTINEL}\" & album of current track \
             & \"{SENTINEL}\" & artwork url of current track \
             & \"{SENTINEL}\" & duration of current track \
             & \"{SENTINEL}\" & player position\n\
             \tend tell\n\
             end if\n\
             output"
        )
    }

    /// Script sending one transport verb, guarded the same way.
    fn command_script(&self, verb: &str) -> String {
        let app = &self.app_name;
        format!(
            "if application \"{app}\" is running then\n\
             \ttell application \"{app}\"\n\
             \t\t{verb}\n\
             \tend tell\n\
             end if"
        )
    }

    async fn run_osascript(script: &str) -> anyhow::Result<String> {
        let output = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .context("failed to run osascript")?;

        if !output.status.success() {
            anyhow::bail!(
                "osascript exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PlayerChannel for OsaChannel {
    async fn query_track(&self) -> anyhow::Result<String> {
        Self::run_osascript(&self.query_script()).await
    }

    async fn send_command(&self, command: TransportCommand) -> anyhow::Result<()> {
        Self::run_osascript(&self.command_script(command.verb())).await?;
        Ok(())
    }
}
