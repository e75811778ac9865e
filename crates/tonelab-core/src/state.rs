//! Original-vs-current image state with change notification.
//!
//! `ImageState` owns the loaded raster and the result of the latest operation.
//! Both are held behind `Arc` and replaced wholesale, so a reader holding a
//! snapshot always sees a complete buffer. Listeners are called synchronously,
//! in subscription order, after every swap. They receive no payload; a
//! listener that needs the new image should defer the read (for example by
//! posting to a channel) and query the state afterwards.

use std::fmt;
use std::sync::Arc;

use crate::error::{ToneError, ToneResult};
use crate::image::RasterBuffer;

/// Change callback registered on an [`ImageState`].
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ImageState::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Lifecycle phase derived from the stored images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing loaded yet.
    Empty,
    /// `current` matches `original`.
    Loaded,
    /// `current` differs from `original`.
    Edited,
}

#[derive(Default)]
pub struct ImageState {
    original: Option<Arc<RasterBuffer>>,
    current: Option<Arc<RasterBuffer>>,
    modified: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageState")
            .field("phase", &self.phase())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ImageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (&self.original, self.modified) {
            (None, _) => Phase::Empty,
            (Some(_), false) => Phase::Loaded,
            (Some(_), true) => Phase::Edited,
        }
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    /// True iff the current raster differs pixel-for-pixel from the original.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// The raster as loaded. Never mutated after assignment.
    pub fn original(&self) -> Option<&Arc<RasterBuffer>> {
        self.original.as_ref()
    }

    /// The result of the latest operation.
    pub fn current(&self) -> Option<&Arc<RasterBuffer>> {
        self.current.as_ref()
    }

    /// Replace both rasters with a newly loaded image and clear `modified`.
    pub fn set_original(&mut self, image: RasterBuffer) {
        let image = Arc::new(image);
        self.current = Some(Arc::clone(&image));
        self.original = Some(image);
        self.modified = false;
        self.notify();
    }

    /// Replace the current raster and recompute `modified` by full comparison.
    ///
    /// Fails with [`ToneError::NoImageLoaded`] when nothing is loaded; the
    /// state is left untouched and no listener fires.
    pub fn set_current(&mut self, image: RasterBuffer) -> ToneResult<()> {
        let original = self.original.as_ref().ok_or(ToneError::NoImageLoaded)?;
        self.modified = !original.same_pixels(&image);
        self.current = Some(Arc::new(image));
        self.notify();
        Ok(())
    }

    /// Restore `current` from `original`. Returns `false` (and does nothing)
    /// when no image is loaded.
    pub fn reset_to_original(&mut self) -> bool {
        let Some(original) = &self.original else {
            return false;
        };
        self.current = Some(Arc::clone(original));
        self.modified = false;
        self.notify();
        true
    }

    /// Register a change callback. Callbacks run in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a previously registered callback. Returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }
}
