//! CLI output formatting.
//!
//! Each view has a `format_*` function that returns lines (pure, no I/O)
//! and, where the binary needs it, a `print_*` wrapper that writes to stdout.
//!
//! ## Load progress
//!
//! ```text
//! 001 a.png
//! 002 b.jpg
//!     skipped not.jpg.txt: Unsupported image format: unrecognized content
//! Loaded 2 images
//! ```
//!
//! ## Listing
//!
//! ```text
//! Images (2 loaded)
//! 001 a.png (4x3)
//! 002 b.jpg (6x5)
//! ```

use crate::collection::{ImageCollection, LoadedFile};
use crate::loader::LoadEvent;
use serde::Serialize;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "image" } else { "images" }
}

/// Format a single load progress event as display lines.
pub fn format_load_event(event: &LoadEvent) -> Vec<String> {
    match event {
        LoadEvent::FirstLoaded { name } => vec![format!("{} {}", format_index(1), name)],
        LoadEvent::Loaded { index, name } => {
            vec![format!("{} {}", format_index(index + 1), name)]
        }
        LoadEvent::Skipped { name, reason } => vec![format!("    skipped {}: {}", name, reason)],
        LoadEvent::Finished { loaded } => vec![format!("Loaded {} {}", loaded, plural(*loaded))],
    }
}

/// Format the loaded collection as an indexed inventory.
pub fn format_listing(collection: &ImageCollection) -> Vec<String> {
    let mut lines = vec![format!("Images ({} loaded)", collection.len())];
    for (i, (file, image)) in collection.files().zip(collection.images()).enumerate() {
        lines.push(format!(
            "{} {} ({}x{})",
            format_index(i + 1),
            file.name,
            image.width(),
            image.height()
        ));
    }
    lines
}

pub fn print_listing(collection: &ImageCollection) {
    for line in format_listing(collection) {
        println!("{}", line);
    }
}

#[derive(Serialize)]
struct ListingEntry<'a> {
    index: usize,
    #[serde(flatten)]
    file: &'a LoadedFile,
    width: u32,
    height: u32,
}

/// Machine-readable listing for `list --json`.
pub fn listing_json(collection: &ImageCollection) -> Result<String, serde_json::Error> {
    let entries: Vec<ListingEntry> = collection
        .files()
        .zip(collection.images())
        .enumerate()
        .map(|(index, (file, image))| ListingEntry {
            index,
            file,
            width: image.width(),
            height: image.height(),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}
