//! # Image Viewer
//!
//! The core of a local image browser. It loads every PNG and JPEG in the
//! working directory into memory, steps through them by index, and applies
//! brightness and sharpening to the image on screen.
//!
//! # Architecture: Load Once, Then Navigate and Adjust
//!
//! ```text
//! 1. Load       cwd            →  ImageCollection   (decode every eligible file)
//! 2. Navigate   Cursor         →  PNG payload       (first / next / previous)
//! 3. Adjust     slot[cursor]   →  JPEG payload      (bright / sharpen, written back)
//! ```
//!
//! Loading is priority-first: entry 0 is decoded on the caller's thread and the
//! rest on one background thread, joined before the call returns. After that the
//! collection never grows or shrinks; adjustments overwrite slots in place.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`decode`] | Name-based eligibility filter and content-sniffing PNG/JPEG decoder |
//! | [`encode`] | Base64 payloads: lossless PNG for navigation, JPEG for adjustments, `"-"` sentinel |
//! | [`collection`] | Ordered slots pairing each decoded image with its source file |
//! | [`loader`] | Directory scan, synchronous first decode, single background decode unit |
//! | [`cursor`] | Index state machine: `next` wraps, `previous` clamps |
//! | [`transform`] | Brightness and unsharp-mask operations with the `-50` calibration offset |
//! | [`session`] | The core surface: one collection, one cursor, one config |
//! | [`config`] | Runtime options assembled from command-line flags |
//! | [`host`] | Line command parser and dispatcher used by the binary |
//! | [`output`] | CLI formatting of load progress and listings |
//!
//! # Design Decisions
//!
//! ## One Mutable Image Per Slot
//!
//! There is no preserved original and no undo. Every adjustment reads the
//! current pixels and replaces them, so repeated calls compound. This keeps
//! memory at one buffer per image.
//!
//! ## Explicit Session
//!
//! Collection, cursor and config live in a [`session::Session`] the host owns,
//! rather than in process-wide statics. There is still exactly one session per
//! run.
//!
//! ## Never Crash on Content
//!
//! Directories with mixed content are the common case. Unreadable directories,
//! undecodable files, unknown operations and empty collections are all logged
//! and turned into an empty collection or the `"-"` sentinel. The only way
//! out of a session is [`session::close`].

pub mod collection;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod encode;
pub mod host;
pub mod loader;
pub mod output;
pub mod session;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_helpers;
