use crate::error::{FolioError, Result};
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// How an outbound URI reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    pub opened: bool,
    pub copied: bool,
}

/// Hands URIs (`https:`, `mailto:`) off to something outside the terminal.
pub trait Launcher {
    fn launch(&mut self, uri: &str) -> Result<LaunchReport>;
}

/// Opens URIs with the platform opener and copies them to the clipboard.
pub struct DesktopLauncher {
    clipboard: Option<arboard::Clipboard>,
}

impl DesktopLauncher {
    pub fn new() -> Self {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                debug!(%err, "clipboard unavailable");
                None
            }
        };
        Self { clipboard }
    }

    fn spawn_opener(uri: &str) -> bool {
        match spawn_reaped(opener_command(std::env::consts::OS, uri)) {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "no desktop opener available");
                false
            }
        }
    }

    fn copy(&mut self, uri: &str) -> bool {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return false;
        };
        match clipboard.set_text(uri.to_string()) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "clipboard copy failed");
                false
            }
        }
    }
}

/// Platform opener for `uri`. The URI is always passed as a single argument
/// and never goes through a shell, so `&` in a mailto query stays intact.
fn opener_command(os: &str, uri: &str) -> Command {
    let mut cmd = match os {
        "macos" => Command::new("open"),
        "windows" => {
            let mut cmd = Command::new("rundll32");
            cmd.arg("url.dll,FileProtocolHandler");
            cmd
        }
        _ => Command::new("xdg-open"),
    };
    cmd.arg(uri);
    cmd
}

/// Start `cmd` detached from the terminal and wait on it from a helper
/// thread so the exited process is reaped.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    thread::Builder::new().name("opener".into()).spawn(move || {
        let status = child.wait();
        if let Ok(status) = &status {
            debug!(%status, "opener exited");
        }
        status
    })
}

impl Default for DesktopLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for DesktopLauncher {
    fn launch(&mut self, uri: &str) -> Result<LaunchReport> {
        let report = LaunchReport {
            opened: Self::spawn_opener(uri),
            copied: self.copy(uri),
        };
        if !report.opened && !report.copied {
            return Err(FolioError::Launch {
                uri: uri.to_string(),
            });
        }
        info!(uri, opened = report.opened, copied = report.copied, "outbound link launched");
        Ok(report)
    }
}

/// Keeps launched URIs in memory instead of touching the desktop.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub launched: Vec<String>,
    pub fail: bool,
}

#[cfg(test)]
impl Launcher for RecordingLauncher {
    fn launch(&mut self, uri: &str) -> Result<LaunchReport> {
        if self.fail {
            return Err(FolioError::Launch {
                uri: uri.to_string(),
            });
        }
        self.launched.push(uri.to_string());
        Ok(LaunchReport {
            opened: true,
            copied: false,
        })
    }
}
