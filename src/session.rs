//! The viewing session: one collection, one cursor, one config.
//!
//! A [`Session`] is the whole core surface the host talks to:
//!
//! | Host call | Method | Returns |
//! |---|---|---|
//! | scan and load | [`Session::scan_and_load`] | populated session |
//! | first | [`Session::first`] | PNG payload, or `"-"` when empty |
//! | next | [`Session::next`] | wraps to the first image past the end |
//! | previous | [`Session::previous`] | stays on the first image at the start |
//! | apply operation | [`Session::apply_operation`] | JPEG payload, or `"-"` |
//! | close | [`close`] | does not return |
//!
//! Host-facing methods never fail: anything that goes wrong is logged and
//! surfaces as [`Payload::Nothing`]. [`Session::apply`] is the typed
//! variant for callers that want the reason.

use crate::collection::{CollectionError, ImageCollection};
use crate::config::ViewerConfig;
use crate::cursor::Cursor;
use crate::encode::{self, EncodeError, Payload};
use crate::loader;
use crate::transform::Operation;
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No active image")]
    NoActiveImage,
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

#[derive(Debug)]
pub struct Session {
    collection: ImageCollection,
    cursor: Cursor,
    config: ViewerConfig,
}

impl Session {
    pub fn new(collection: ImageCollection, config: ViewerConfig) -> Self {
        Self {
            collection,
            cursor: Cursor::new(),
            config,
        }
    }

    /// Load the working directory and start a session over it.
    pub fn scan_and_load(config: ViewerConfig) -> Self {
        Self::new(loader::scan_and_load(), config)
    }

    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn first(&mut self) -> Payload {
        let target = self.cursor.first(self.collection.len());
        self.show(target)
    }

    pub fn next(&mut self) -> Payload {
        let target = self.cursor.next(self.collection.len());
        self.show(target)
    }

    pub fn previous(&mut self) -> Payload {
        let target = self.cursor.previous(self.collection.len());
        self.show(target)
    }

    /// Apply a named operation to the current image.
    ///
    /// Unknown kinds leave the collection untouched and return the sentinel.
    pub fn apply_operation(&mut self, kind: &str, magnitude: f64) -> Payload {
        let op = match kind.parse::<Operation>() {
            Ok(op) => op,
            Err(e) => {
                warn!(error = %e, "ignoring operation request");
                return Payload::Nothing;
            }
        };

        match self.apply(op, magnitude) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(operation = %op, error = %e, "operation produced no image");
                Payload::Nothing
            }
        }
    }

    /// Apply `op` to the current image, replace the slot with the result and
    /// return it lossily encoded.
    pub fn apply(&mut self, op: Operation, magnitude: f64) -> Result<Payload, SessionError> {
        let index = self
            .cursor
            .current(self.collection.len())
            .ok_or(SessionError::NoActiveImage)?;
        debug!(operation = %op, magnitude, index, "applying operation");

        let image = self
            .collection
            .get(index)
            .ok_or(SessionError::NoActiveImage)?;
        let adjusted = op.apply(image, magnitude);
        self.collection.replace(index, adjusted)?;

        let image = self
            .collection
            .get(index)
            .ok_or(SessionError::NoActiveImage)?;
        Ok(encode::encode_lossy(image, self.config.lossy_quality)?)
    }

    fn show(&self, target: Option<usize>) -> Payload {
        let Some(image) = target.and_then(|i| self.collection.get(i)) else {
            return Payload::Nothing;
        };
        match encode::encode_lossless(image) {
            Ok(payload) => payload,
            Err(e) => {
                error!(index = self.cursor.index(), error = %e, "failed to encode image");
                Payload::Nothing
            }
        }
    }
}

/// Terminate the process immediately. No cleanup runs.
pub fn close() -> ! {
    std::process::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::LoadedFile;
    use crate::test_helpers::{decode_payload, gradient_rgb, solid_rgb, solid_rgb16};
    use image::DynamicImage;
    use std::path::PathBuf;

    fn session_of(images: Vec<(&str, DynamicImage)>) -> Session {
        let mut collection = ImageCollection::new();
        for (name, image) in images {
            collection.push(
                LoadedFile {
                    name: name.to_string(),
                    path: PathBuf::from("/photos").join(name),
                },
                image,
            );
        }
        Session::new(collection, ViewerConfig::default())
    }

    fn three() -> Session {
        session_of(vec![
            ("a.png", solid_rgb(1, 1, [10, 10, 10])),
            ("b.png", solid_rgb(2, 1, [20, 20, 20])),
            ("c.png", solid_rgb(3, 1, [30, 30, 30])),
        ])
    }

    fn width(payload: &Payload) -> u32 {
        decode_payload(payload).width()
    }

    #[test]
    fn empty_session_returns_sentinel_everywhere() {
        let mut s = session_of(vec![]);
        assert!(s.first().is_sentinel());
        assert!(s.next().is_sentinel());
        assert!(s.previous().is_sentinel());
        assert!(s.apply_operation("bright", 80.0).is_sentinel());
    }

    #[test]
    fn apply_without_image_is_no_active_image() {
        let mut s = session_of(vec![]);
        let err = s.apply(Operation::Brighten, 80.0).unwrap_err();
        assert!(matches!(err, SessionError::NoActiveImage));
    }

    #[test]
    fn first_shows_slot_zero() {
        let mut s = three();
        assert_eq!(width(&s.first()), 1);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn next_walks_and_wraps() {
        let mut s = three();
        assert_eq!(width(&s.next()), 2);
        assert_eq!(width(&s.next()), 3);
        assert_eq!(width(&s.next()), 1);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn next_n_times_equals_first() {
        let mut s = three();
        let first = s.first();
        let mut last = Payload::Nothing;
        for _ in 0..s.collection().len() {
            last = s.next();
        }
        assert_eq!(last, first);
    }

    #[test]
    fn previous_clamps_to_first() {
        let mut s = three();
        let first = s.first();
        assert_eq!(s.previous(), first);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn previous_steps_back() {
        let mut s = three();
        s.next();
        s.next();
        assert_eq!(width(&s.previous()), 2);
    }

    #[test]
    fn apply_replaces_current_slot_only() {
        let mut s = three();
        s.next();
        let payload = s.apply_operation("bright", 60.0);
        assert!(!payload.is_sentinel());

        let rgb = |i: usize| s.collection().get(i).unwrap().to_rgb8().get_pixel(0, 0).0;
        assert_eq!(rgb(0), [10, 10, 10]);
        assert_eq!(rgb(1), [46, 46, 46]);
        assert_eq!(rgb(2), [30, 30, 30]);
    }

    #[test]
    fn apply_is_cumulative() {
        let mut s = session_of(vec![("a.png", solid_rgb(2, 2, [100, 100, 100]))]);
        s.apply_operation("bright", 60.0);
        let once = s.collection().get(0).unwrap().to_rgb8();
        s.apply_operation("bright", 60.0);
        let twice = s.collection().get(0).unwrap().to_rgb8();

        assert_ne!(once, twice);
        assert_eq!(twice.get_pixel(0, 0).0, [152, 152, 152]);
    }

    #[test]
    fn neutral_brightness_leaves_pixels_alone() {
        let original = gradient_rgb(8, 8);
        let mut s = session_of(vec![("a.png", original.clone())]);
        s.apply_operation("bright", 50.0);
        assert_eq!(s.collection().get(0).unwrap().to_rgb8(), original.to_rgb8());
    }

    #[test]
    fn unknown_operation_returns_sentinel_and_keeps_image() {
        let original = gradient_rgb(8, 8);
        let mut s = session_of(vec![("a.png", original.clone())]);

        assert_eq!(s.apply_operation("unknown", 1.0).as_str(), "-");
        assert_eq!(s.collection().get(0).unwrap().to_rgb8(), original.to_rgb8());
    }

    #[test]
    fn applied_payload_is_lossy_jpeg_of_new_image() {
        let mut s = session_of(vec![("a.png", solid_rgb(6, 4, [100, 100, 100]))]);
        let payload = s.apply(Operation::Sharpen, 55.0).unwrap();

        let decoded = decode_payload(&payload);
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }

    #[test]
    fn navigation_shows_adjusted_image() {
        let mut s = session_of(vec![
            ("a.png", solid_rgb(1, 1, [100, 100, 100])),
            ("b.png", solid_rgb(1, 1, [0, 0, 0])),
        ]);
        s.apply_operation("bright", 60.0);
        s.next();
        let back = s.first();
        assert_eq!(decode_payload(&back).to_rgb8().get_pixel(0, 0).0, [126, 126, 126]);
    }

    #[test]
    fn brighten_moves_16_bit_images() {
        let mut s = session_of(vec![("deep.png", solid_rgb16(2, 2, [32768, 32768, 32768]))]);
        let payload = s.apply_operation("bright", 100.0);
        assert!(!payload.is_sentinel());

        let stored = s.collection().get(0).unwrap().to_rgb8();
        assert_eq!(stored.get_pixel(0, 0).0, [255, 255, 255]);
        let shown = decode_payload(&payload).to_rgb8();
        assert!(shown.get_pixel(1, 1).0[0] > 250);
    }

    #[test]
    fn non_finite_sharpen_keeps_session_alive() {
        let original = gradient_rgb(8, 8);
        let mut s = session_of(vec![("a.png", original.clone())]);

        for magnitude in [f64::NAN, f64::INFINITY] {
            assert!(!s.apply_operation("sharpen", magnitude).is_sentinel());
        }
        assert_eq!(s.collection().get(0).unwrap().to_rgb8(), original.to_rgb8());
        assert!(!s.first().is_sentinel());
    }
}
