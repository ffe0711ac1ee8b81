//! File watching for field files.
//!
//! Uses notify crate for cross-platform file system events. Every relevant
//! event is forwarded as-is; the synchronizer does the debouncing.
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// A file backing a watched field.
#[derive(Debug, Clone)]
struct WatchedFile {
    path: PathBuf,
    name: Option<OsString>,
    root: PathBuf,
}

impl WatchedFile {
    fn new(path: PathBuf) -> Self {
        let name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let root = watch_root_for(&path);
        Self { path, name, root }
    }
}

/// Watches the files behind a set of fields and signals each change.
pub struct FieldWatcher {
    _watcher: RecommendedWatcher,
    rx: UnboundedReceiver<PathBuf>,
    roots: Vec<PathBuf>,
}

impl FieldWatcher {
    /// Create a watcher for `paths`.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or a directory cannot be watched.
    pub fn new<I, P>(paths: I) -> notify::Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        // Canonicalize so event paths from the OS (which are always absolute
        // and canonical) match our stored paths.
        let files: Vec<WatchedFile> = paths
            .into_iter()
            .map(|path| {
                let path = path
                    .as_ref()
                    .canonicalize()
                    .unwrap_or_else(|_| path.as_ref().to_path_buf());
                WatchedFile::new(path)
            })
            .collect();
        let roots: Vec<PathBuf> = files
            .iter()
            .map(|f| f.root.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Some(path) = relevant_path(&event, &files) {
                    let _ = tx.send(path);
                }
            }
            Err(err) => tracing::warn!(%err, "file watcher error"),
        })?;
        for root in &roots {
            watcher.watch(root, RecursiveMode::NonRecursive)?;
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            roots,
        })
    }

    /// Directories being watched.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Wait for the next change to a watched file; returns its path.
    pub async fn changed(&mut self) -> Option<PathBuf> {
        self.rx.recv().await
    }
}

/// The watched file an event touches, if any.
///
/// Some backends (FSEvents) only report the containing directory; such an
/// event counts for the first file watched under that directory.
fn relevant_path(event: &Event, files: &[WatchedFile]) -> Option<PathBuf> {
    files
        .iter()
        .find(|file| {
            event.paths.iter().any(|path| {
                path == &file.root
                    || path == &file.path
                    || file
                        .name
                        .as_ref()
                        .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
            })
        })
        .map(|file| file.path.clone())
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
