//! Download delegation for keyweb.
//!
//! Downloads are not handled in-process. Each request launches the configured
//! helper program with the resource URL as its only argument and returns
//! immediately. The helper's outcome is only logged.

use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, info, warn};

use crate::types::errors::DownloadError;

/// Trait defining download hand-off.
pub trait DownloadManagerTrait {
    fn start_download(&self, url: &str) -> Result<(), DownloadError>;
}

/// Launches an external helper process per download.
#[derive(Debug, Clone)]
pub struct DownloadManager {
    program: String,
}

impl DownloadManager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn start_download(&self, url: &str) -> Result<(), DownloadError> {
        let spawned = Command::new(&self.program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                let pid = child.id();
                info!(program = %self.program, pid, url, "download handed off");
                // Reaped off-thread so the request returns at once.
                let program = self.program.clone();
                thread::spawn(move || match child.wait() {
                    Ok(status) => debug!(program = %program, pid, %status, "download helper exited"),
                    Err(e) => warn!(program = %program, pid, error = %e, "download helper wait failed"),
                });
                Ok(())
            }
            Err(e) => {
                warn!(program = %self.program, url, error = %e, "download helper failed to start");
                Err(DownloadError::Spawn {
                    program: self.program.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
