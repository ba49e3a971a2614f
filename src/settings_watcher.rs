//! Settings hot-reload.
//!
//! Watches the directory containing the settings file (editors often replace
//! files rather than write them in place) and turns file system events for
//! that one file into [`SettingsEvent`]s. Polling never blocks, so a host can
//! call [`SettingsWatcher::poll`] once per frame.

use crate::error::CanvasResult;
use crate::settings::CanvasSettings;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use tracing::{debug, info, warn};

/// Outcome of a settings file change
#[derive(Debug)]
pub enum SettingsEvent {
    /// The file was created or modified and parsed successfully
    Changed(CanvasSettings),
    /// The file was removed
    Deleted,
    /// The file changed but could not be loaded, or the watcher failed
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    /// Start watching `path`. The file's parent directory must exist.
    pub fn new(path: PathBuf) -> CanvasResult<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching canvas settings");

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending file system events, returning the latest relevant one
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(mapped) = self.map_event(&event) {
                        latest = Some(mapped);
                    }
                }
                Ok(Err(e)) => latest = Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Settings watcher channel disconnected");
                    break;
                }
            }
        }
        latest
    }

    fn map_event(&self, event: &Event) -> Option<SettingsEvent> {
        let file_name = self.path.file_name()?;
        if !event.paths.iter().any(|p| p.file_name() == Some(file_name)) {
            return None;
        }

        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => {
                match CanvasSettings::load_from(&self.path) {
                    Ok(settings) => {
                        info!("Canvas settings changed, reloading");
                        Some(SettingsEvent::Changed(settings))
                    }
                    Err(e) => Some(SettingsEvent::Error(e.to_string())),
                }
            }
            EventKind::Remove(_) => Some(SettingsEvent::Deleted),
            _ => None,
        }
    }
}
