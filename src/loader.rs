//! Directory scanning and collection population.
//!
//! Loading is **priority-first**: the first directory entry is decoded on the
//! calling thread so there is something to show straight away, then a single
//! background unit decodes the remaining entries in listing order.
//!
//! ```text
//! entries (sorted by name)   [e0] [e1] [e2] … [eN-1]
//!                             │    └──────┬──────┘
//!                    caller thread    one scoped thread, sequential
//!                             │           │
//!                             ▼           ▼
//!                     slot 0 (if e0 decodes), then appends in order
//! ```
//!
//! `load_all` joins the background unit before returning, so callers see one
//! blocking call. Callers that want to react as images arrive pass a
//! [`Sender<LoadEvent>`] and drain it from another thread while the load runs.
//!
//! ## Concurrency
//!
//! The background unit holds the only `&mut ImageCollection` for as long as it
//! runs, so appends need no lock. Fanning the work out per file would need a
//! guarded append instead.
//!
//! ## Failure handling
//!
//! | Failure | Effect |
//! |---|---|
//! | working directory unresolvable | `error` log, empty collection |
//! | directory unreadable | `error` log, empty collection |
//! | ineligible name | silently ignored |
//! | eligible but undecodable | `warn` log, [`LoadEvent::Skipped`], scan continues |

use crate::collection::{ImageCollection, LoadedFile};
use crate::decode::{self, DecodeError};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to resolve working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Background decode worker panicked")]
    Background,
}

/// Progress notifications emitted while a directory loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// The synchronously decoded first entry is available at index 0.
    FirstLoaded { name: String },
    /// A background entry was appended at `index`.
    Loaded { index: usize, name: String },
    /// An eligible entry failed to decode and was left out.
    Skipped { name: String, reason: String },
    /// Loading is complete; no further events follow.
    Finished { loaded: usize },
}

/// Load every eligible image in the process working directory.
///
/// Never fails: environment errors are logged and leave the collection empty.
pub fn scan_and_load() -> ImageCollection {
    scan_and_load_with_events(None)
}

/// [`scan_and_load`] with progress events.
pub fn scan_and_load_with_events(events: Option<Sender<LoadEvent>>) -> ImageCollection {
    collection_or_empty(
        std::env::current_dir()
            .map_err(LoadError::WorkingDir)
            .and_then(|dir| load_all_with_events(&dir, events)),
    )
}

/// Unwrap a load result, logging a failure and standing in an empty collection.
fn collection_or_empty(result: Result<ImageCollection, LoadError>) -> ImageCollection {
    match result {
        Ok(collection) => collection,
        Err(e) => {
            error!(error = %e, "image load aborted");
            ImageCollection::new()
        }
    }
}

/// Load every eligible image in `dir`.
pub fn load_all(dir: &Path) -> Result<ImageCollection, LoadError> {
    load_all_with_events(dir, None)
}

/// Load every eligible image in `dir`, reporting progress on `events`.
///
/// A dropped receiver does not interrupt loading.
pub fn load_all_with_events(
    dir: &Path,
    events: Option<Sender<LoadEvent>>,
) -> Result<ImageCollection, LoadError> {
    let entries = list_entries(dir)?;
    debug!(dir = %dir.display(), entries = entries.len(), "listed directory");

    let mut collection = ImageCollection::new();
    let events = events.as_ref();

    if let Some((first, rest)) = entries.split_first() {
        if let Some((file, image)) = load_entry(first, events) {
            info!(file = %file.name, "first image has been loaded");
            emit(events, LoadEvent::FirstLoaded {
                name: file.name.clone(),
            });
            collection.push(file, image);
        }

        let collection = &mut collection;
        std::thread::scope(|scope| {
            scope
                .spawn(move || {
                    for entry in rest {
                        if let Some((file, image)) = load_entry(entry, events) {
                            emit(events, LoadEvent::Loaded {
                                index: collection.len(),
                                name: file.name.clone(),
                            });
                            collection.push(file, image);
                        }
                    }
                })
                .join()
        })
        .map_err(|_| LoadError::Background)?;
    }

    info!(
        dir = %dir.display(),
        loaded = collection.len(),
        scanned = entries.len(),
        "directory scan finished"
    );
    emit(events, LoadEvent::Finished {
        loaded: collection.len(),
    });
    Ok(collection)
}

/// Immediate children of `dir`, sorted by file name.
///
/// Any read error aborts the whole listing.
fn list_entries(dir: &Path) -> Result<Vec<DirEntry>, LoadError> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// Filter and decode one entry. `None` means the entry contributes nothing.
fn load_entry(
    entry: &DirEntry,
    events: Option<&Sender<LoadEvent>>,
) -> Option<(LoadedFile, DynamicImage)> {
    let name = entry.file_name().to_string_lossy().into_owned();
    if !decode::is_eligible(&name) {
        return None;
    }

    match decode::decode_file(entry.path()) {
        Ok(image) => Some((
            LoadedFile {
                name,
                path: entry.path().to_path_buf(),
            },
            image,
        )),
        Err(e) => {
            report_skip(&name, &e);
            emit(events, LoadEvent::Skipped {
                name,
                reason: e.to_string(),
            });
            None
        }
    }
}

fn report_skip(name: &str, err: &DecodeError) {
    warn!(file = %name, error = %err, "failed to decode image, skipping");
}

fn emit(events: Option<&Sender<LoadEvent>>, event: LoadEvent) {
    if let Some(tx) = events {
        // Receiver gone means nobody is listening; loading carries on.
        let _ = tx.send(event);
    }
}
