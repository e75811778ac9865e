//! Editing session over an `ImageState`: parameters, corrections, load and export.
//!
//! The `Editor` is the only place image state changes. Reversible adjustments
//! always re-run the tone chain on a copy of the original; one-shot
//! corrections operate on the current raster.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::codec::{self, EncodeOptions, ExportFormat};
use crate::error::{ToneError, ToneResult};
use crate::grading::{grayscale, stretch, tone};
use crate::image::RasterBuffer;
use crate::scopes::histogram::{self, HistogramData};
use crate::state::{ImageState, ListenerId};
use crate::transform::lut::{Lut1D, validate_gamma};
use crate::transform::params::{
    AdjustmentParams, SliderPositions, brightness_from_slider, contrast_from_slider,
    gamma_from_position, saturation_from_slider,
};

/// An editor shared between threads. Requests serialize on the mutex.
pub type SharedEditor = Arc<Mutex<Editor>>;

#[derive(Debug, Default)]
pub struct Editor {
    state: ImageState,
    params: AdjustmentParams,
    encode_options: EncodeOptions,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor with custom encoder settings.
    pub fn with_encode_options(encode_options: EncodeOptions) -> Self {
        Self {
            encode_options,
            ..Self::default()
        }
    }

    /// Wrap this editor for use from several threads.
    pub fn into_shared(self) -> SharedEditor {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &ImageState {
        &self.state
    }

    pub fn params(&self) -> &AdjustmentParams {
        &self.params
    }

    /// Snapshot of the current raster.
    pub fn current(&self) -> Option<Arc<RasterBuffer>> {
        self.state.current().cloned()
    }

    /// Snapshot of the loaded raster.
    pub fn original(&self) -> Option<Arc<RasterBuffer>> {
        self.state.original().cloned()
    }

    pub fn is_modified(&self) -> bool {
        self.state.is_modified()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.state.unsubscribe(id)
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Install a decoded raster as the new original and reset all adjustments.
    pub fn load_raster(&mut self, raster: RasterBuffer) {
        tracing::info!(
            "loaded {}x{} {} image",
            raster.width(),
            raster.height(),
            raster.format()
        );
        self.params = AdjustmentParams::default();
        self.state.set_original(raster);
    }

    /// Decode and load an in-memory container. On failure the state is untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> ToneResult<()> {
        let raster = codec::decode(bytes)?;
        self.load_raster(raster);
        Ok(())
    }

    /// Read, decode, and load an image file. On failure the state is untouched.
    pub fn load_path(&mut self, path: &Path) -> ToneResult<()> {
        let raster = codec::load(path)?;
        self.load_raster(raster);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Reversible adjustments
    // ---------------------------------------------------------------------

    /// Brightness slider in `[-100, 100]`.
    pub fn set_brightness(&mut self, value: i32) -> ToneResult<()> {
        self.params.brightness = brightness_from_slider(value);
        self.apply_adjustments()
    }

    /// Contrast slider in `[-100, 100]`.
    pub fn set_contrast(&mut self, value: i32) -> ToneResult<()> {
        self.params.contrast = contrast_from_slider(value);
        self.apply_adjustments()
    }

    /// Saturation slider in `[-100, 100]`.
    pub fn set_saturation(&mut self, value: i32) -> ToneResult<()> {
        self.params.saturation = saturation_from_slider(value);
        self.apply_adjustments()
    }

    /// Gamma slider in `[10, 300]`.
    pub fn set_gamma_position(&mut self, position: i32) -> ToneResult<()> {
        self.params.gamma = gamma_from_position(position);
        self.apply_adjustments()
    }

    /// Raw gamma value. Rejects non-positive or non-finite values without
    /// touching the current parameters.
    pub fn set_gamma(&mut self, gamma: f64) -> ToneResult<()> {
        validate_gamma(gamma)?;
        self.params.gamma = gamma;
        self.apply_adjustments()
    }

    /// Replace all parameters at once after validating them.
    pub fn set_params(&mut self, params: AdjustmentParams) -> ToneResult<()> {
        params.validate()?;
        self.params = params;
        self.apply_adjustments()
    }

    /// Apply a full set of slider positions.
    pub fn apply_sliders(&mut self, sliders: &SliderPositions) -> ToneResult<()> {
        self.set_params(sliders.to_params())
    }

    /// Re-run the tone chain on a copy of the original.
    ///
    /// Fails with [`ToneError::NoImageLoaded`] when nothing is loaded. The
    /// parameters set by the caller are kept for the next load.
    pub fn apply_adjustments(&mut self) -> ToneResult<()> {
        let original = self.state.original().cloned().ok_or(ToneError::NoImageLoaded)?;
        tracing::debug!(params = ?self.params, "applying adjustments");
        let adjusted = tone::apply(&original, &self.params)?;
        self.state.set_current(adjusted)
    }

    /// Reset every parameter to identity and restore the original raster.
    pub fn reset_all_adjustments(&mut self) {
        self.params = AdjustmentParams::default();
        self.state.reset_to_original();
    }

    // ---------------------------------------------------------------------
    // One-shot corrections
    // ---------------------------------------------------------------------

    /// Replace the current raster with its BT.601 luma.
    pub fn convert_to_grayscale(&mut self) -> ToneResult<()> {
        let current = self.require_current()?;
        self.state.set_current(grayscale::apply(&current))
    }

    /// Stretch each channel of the current raster to the full range.
    pub fn linear_stretch(&mut self) -> ToneResult<()> {
        let current = self.require_current()?;
        self.state.set_current(stretch::apply(&current))
    }

    /// Apply a gamma LUT to the current raster.
    pub fn gamma_correction(&mut self, gamma: f64) -> ToneResult<()> {
        let current = self.require_current()?;
        let lut = Lut1D::gamma(gamma)?;
        self.state.set_current(lut.apply(&current))
    }

    // ---------------------------------------------------------------------
    // Inspection and export
    // ---------------------------------------------------------------------

    /// Histogram of the current raster.
    pub fn histogram(&self) -> ToneResult<HistogramData> {
        let current = self.require_current()?;
        Ok(histogram::compute(&current))
    }

    /// Encode the current raster.
    pub fn export(&self, format: ExportFormat) -> ToneResult<Vec<u8>> {
        let current = self.require_current()?;
        codec::encode_with(&current, format, &self.encode_options)
    }

    /// Encode the current raster to a file. The format follows the path's
    /// extension; a path without a known one gets `.jpg` appended.
    pub fn save(&self, path: &Path) -> ToneResult<()> {
        let format = ExportFormat::from_path(path);
        self.save_as(&format.ensure_extension(path), format)
    }

    /// Encode the current raster to a file in an explicit format.
    pub fn save_as(&self, path: &Path, format: ExportFormat) -> ToneResult<()> {
        let current = self.require_current()?;
        codec::save(&current, path, format, &self.encode_options)
    }

    fn require_current(&self) -> ToneResult<Arc<RasterBuffer>> {
        self.current().ok_or(ToneError::NoImageLoaded)
    }
}
