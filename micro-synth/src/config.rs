#[allow(unused_imports)]
use micromath::F32Ext;
use thiserror::Error;

/// Reasons a renderer or band aggregator refuses its configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("band count must be greater than 0")]
    NoBands,

    #[error("rectangle max height must be greater than 0")]
    ZeroMaxHeight,

    #[error("rectangle width must be greater than 0")]
    ZeroWidth,

    #[error("bar geometry does not fit pixel coordinates: width {width}, max height {max_height}, spacing {spacing}")]
    GeometryTooLarge {
        width: u32,
        max_height: u32,
        spacing: u32,
    },

    #[error("smoothing factor must be in (0, 1], got {0}")]
    SmoothingOutOfRange(f32),

    #[error("band intensity must be finite and non-negative, got {0}")]
    InvalidIntensity(f32),

    #[error("peak decay factor must be in (0, 1], got {0}")]
    DecayOutOfRange(f32),

    #[error("exponential spread factor must be greater than 0, got {0}")]
    InvalidSpreadFactor(f32),

    #[error("cannot spread {bins_in} input bins over {bands_out} bands")]
    TooFewBins { bins_in: usize, bands_out: usize },
}

/// How the normalization peak evolves between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PeakTracking {
    /// Keep the loudest amplitude seen since initialization.
    #[default]
    Hold,
    /// Multiply the peak by `factor` every frame before folding in the
    /// current amplitudes.
    Decay { factor: f32 },
}

/// Layout and response tunables for a [`crate::SpectrumBarRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub rect_spacing: u32,
    pub rect_width: u32,
    pub rect_max_height: u32,
    pub band_intensity: f32,
    /// Exponential moving average coefficient applied once per frame.
    /// 0.1 to 0.3 gives a visually smooth response.
    pub smoothing_factor: f32,
    /// Pixels the bar center line sits above the viewport's vertical center.
    pub vertical_offset: i32,
    pub peak_tracking: PeakTracking,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rect_spacing: 1,
            rect_width: 3,
            rect_max_height: 40,
            band_intensity: 1.75,
            smoothing_factor: 0.3,
            vertical_offset: 200,
            peak_tracking: PeakTracking::Hold,
        }
    }
}

impl RenderConfig {
    pub fn with_rect_spacing(mut self, rect_spacing: u32) -> Self {
        self.rect_spacing = rect_spacing;
        self
    }

    pub fn with_rect_width(mut self, rect_width: u32) -> Self {
        self.rect_width = rect_width;
        self
    }

    pub fn with_rect_max_height(mut self, rect_max_height: u32) -> Self {
        self.rect_max_height = rect_max_height;
        self
    }

    pub fn with_band_intensity(mut self, band_intensity: f32) -> Self {
        self.band_intensity = band_intensity;
        self
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f32) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    pub fn with_vertical_offset(mut self, vertical_offset: i32) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }

    pub fn with_peak_tracking(mut self, peak_tracking: PeakTracking) -> Self {
        self.peak_tracking = peak_tracking;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rect_max_height == 0 {
            return Err(ConfigError::ZeroMaxHeight);
        }
        if self.rect_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        // Outlines add the spacing to both the bar width and height.
        let fits = |extent: u32| {
            extent
                .checked_add(self.rect_spacing)
                .is_some_and(|total| total <= i32::MAX as u32)
        };
        if !fits(self.rect_width) || !fits(self.rect_max_height) {
            return Err(ConfigError::GeometryTooLarge {
                width: self.rect_width,
                max_height: self.rect_max_height,
                spacing: self.rect_spacing,
            });
        }
        // Written so NaN fails too.
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing_factor));
        }
        if !self.band_intensity.is_finite() || self.band_intensity < 0.0 {
            return Err(ConfigError::InvalidIntensity(self.band_intensity));
        }
        if let PeakTracking::Decay { factor } = self.peak_tracking {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(ConfigError::DecayOutOfRange(factor));
            }
        }
        Ok(())
    }

    /// Rescales the per-frame smoothing factor to a frame that lasted
    /// `elapsed_secs`, so the response matches what the configured factor
    /// gives at one frame every `reference_frame_secs`.
    pub fn smoothing_for_elapsed(&self, elapsed_secs: f32, reference_frame_secs: f32) -> f32 {
        if !(elapsed_secs > 0.0) || !(reference_frame_secs > 0.0) {
            return self.smoothing_factor;
        }
        let frames = elapsed_secs / reference_frame_secs;
        let retained = (1.0 - self.smoothing_factor).powf(frames);
        (1.0 - retained).clamp(f32::MIN_POSITIVE, 1.0)
    }
}
