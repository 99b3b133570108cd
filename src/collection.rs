//! The in-memory image store.
//!
//! Each slot pairs a decoded image with the file it came from, so image `i`
//! and file `i` can never drift apart. Slots are appended only while loading;
//! afterwards they are overwritten in place by transforms and never removed.

use image::DynamicImage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Slot {index} out of range for collection of {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Where a loaded image came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedFile {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
struct Slot {
    file: LoadedFile,
    image: DynamicImage,
}

/// Ordered decoded images plus their source files.
#[derive(Debug, Default)]
pub struct ImageCollection {
    slots: Vec<Slot>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: LoadedFile, image: DynamicImage) {
        self.slots.push(Slot { file, image });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DynamicImage> {
        self.slots.get(index).map(|s| &s.image)
    }

    pub fn file(&self, index: usize) -> Option<&LoadedFile> {
        self.slots.get(index).map(|s| &s.file)
    }

    pub fn files(&self) -> impl Iterator<Item = &LoadedFile> {
        self.slots.iter().map(|s| &s.file)
    }

    pub fn images(&self) -> impl Iterator<Item = &DynamicImage> {
        self.slots.iter().map(|s| &s.image)
    }

    /// Overwrite the image in a slot, returning the buffer it held.
    pub fn replace(
        &mut self,
        index: usize,
        image: DynamicImage,
    ) -> Result<DynamicImage, CollectionError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(CollectionError::OutOfRange { index, len })?;
        Ok(std::mem::replace(&mut slot.image, image))
    }

    /// The directory the images were loaded from, re-derived from the first
    /// file's path.
    pub fn directory(&self) -> Option<&Path> {
        self.slots.first().and_then(|s| s.file.path.parent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::solid_rgb;

    fn loaded(name: &str) -> LoadedFile {
        LoadedFile {
            name: name.to_string(),
            path: Path::new("/photos").join(name),
        }
    }

    #[test]
    fn new_collection_is_empty() {
        let c = ImageCollection::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.get(0).is_none());
        assert!(c.directory().is_none());
    }

    #[test]
    fn push_keeps_files_and_images_aligned() {
        let mut c = ImageCollection::new();
        c.push(loaded("a.png"), solid_rgb(1, 1, [1, 1, 1]));
        c.push(loaded("b.jpg"), solid_rgb(2, 2, [2, 2, 2]));

        assert_eq!(c.len(), 2);
        assert_eq!(c.files().count(), c.images().count());
        assert_eq!(c.file(1).unwrap().name, "b.jpg");
        assert_eq!(c.get(1).unwrap().width(), 2);
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut c = ImageCollection::new();
        c.push(loaded("a.png"), solid_rgb(1, 1, [1, 1, 1]));

        let old = c.replace(0, solid_rgb(5, 5, [9, 9, 9])).unwrap();
        assert_eq!(old.width(), 1);
        assert_eq!(c.get(0).unwrap().width(), 5);
        assert_eq!(c.len(), 1);
        assert_eq!(c.file(0).unwrap().name, "a.png");
    }

    #[test]
    fn replace_out_of_range_errors() {
        let mut c = ImageCollection::new();
        let err = c.replace(0, solid_rgb(1, 1, [0, 0, 0])).unwrap_err();
        assert!(matches!(err, CollectionError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn directory_comes_from_first_file() {
        let mut c = ImageCollection::new();
        c.push(loaded("a.png"), solid_rgb(1, 1, [1, 1, 1]));
        assert_eq!(c.directory(), Some(Path::new("/photos")));
    }
}
