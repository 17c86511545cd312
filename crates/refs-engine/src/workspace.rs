//! The editor side of navigation.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// What navigation asks of the surrounding editor.
pub trait Workspace: Send + Sync {
    /// Show a non-fatal warning.
    fn notify_warning(&self, title: &str, detail: &str);

    /// Open a URL outside of the editor.
    fn open_external(&self, url: &str);

    /// Offer to create a missing file a clicked path points to.
    fn offer_create_file(&self, path: &Path);
}

/// A workspace with no user interface; everything goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWorkspace;

impl Workspace for LogWorkspace {
    fn notify_warning(&self, title: &str, detail: &str) {
        log::debug!("{title}: {detail}");
    }

    fn open_external(&self, url: &str) {
        log::info!("open {url}");
    }

    fn offer_create_file(&self, path: &Path) {
        log::info!("{} does not exist", path.display());
    }
}

/// A workspace that remembers every request, for callers that report
/// them afterwards.
#[derive(Debug, Default)]
pub struct RecordingWorkspace {
    warnings: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
    create_offers: Mutex<Vec<PathBuf>>,
}

impl RecordingWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    pub fn create_offers(&self) -> Vec<PathBuf> {
        self.create_offers.lock().clone()
    }
}

impl Workspace for RecordingWorkspace {
    fn notify_warning(&self, _title: &str, detail: &str) {
        self.warnings.lock().push(detail.to_string());
    }

    fn open_external(&self, url: &str) {
        self.opened.lock().push(url.to_string());
    }

    fn offer_create_file(&self, path: &Path) {
        self.create_offers.lock().push(path.to_path_buf());
    }
}
