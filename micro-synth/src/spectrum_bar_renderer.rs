use alloc::{vec, vec::Vec};

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::{Rgb888, RgbColor},
    primitives::Rectangle,
};

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::band_source::FrequencyBandSource;
use crate::color::{hsv_to_rgb, HueWindow};
use crate::config::{ConfigError, PeakTracking, RenderConfig};
use crate::draw_sink::RectDrawSink;

/// Frame length the configured smoothing factor is tuned for in
/// [`SpectrumBarRenderer::render_timed`].
pub const REFERENCE_FRAME_SECS: f32 = 1.0 / 60.0;

const OPAQUE: u8 = 255;

/// Turns per-band amplitudes into a centered row of smoothed, hue-graded
/// bars.
///
/// Amplitudes are normalized against a rolling peak: the loudest amplitude
/// seen since initialization (see [`PeakTracking`]). Each bar then follows
/// its normalized target through an exponential moving average, so
/// `previous_heights` always lies in `[0, rect_max_height]`.
pub struct SpectrumBarRenderer {
    config: RenderConfig,
    previous_heights: Vec<f32>,
    max_amplitude: f32,
}

impl SpectrumBarRenderer {
    pub fn initialize(band_count: usize, config: RenderConfig) -> Result<Self, ConfigError> {
        if band_count == 0 {
            synth_warn!("SpectrumBarRenderer rejected: no bands");
            return Err(ConfigError::NoBands);
        }
        if let Err(e) = config.validate() {
            synth_warn!("SpectrumBarRenderer rejected: invalid config");
            return Err(e);
        }
        synth_info!(
            "SpectrumBarRenderer::initialize bands: {}, rect: {}x{}, spacing: {}, smoothing: {}",
            band_count,
            config.rect_width,
            config.rect_max_height,
            config.rect_spacing,
            config.smoothing_factor
        );

        Ok(Self {
            config,
            previous_heights: vec![0.0; band_count],
            max_amplitude: 0.0,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn band_count(&self) -> usize {
        self.previous_heights.len()
    }

    /// Smoothed bar heights in pixels, as of the last render.
    pub fn previous_heights(&self) -> &[f32] {
        &self.previous_heights
    }

    /// The rolling peak amplitude used as the normalization denominator.
    pub fn max_amplitude(&self) -> f32 {
        self.max_amplitude
    }

    /// Drops all bars to zero and forgets the rolling peak.
    pub fn reset(&mut self) {
        self.previous_heights.iter_mut().for_each(|h| *h = 0.0);
        self.max_amplitude = 0.0;
    }

    /// Draws one frame with the configured per-frame smoothing factor.
    pub fn render<B, S>(
        &mut self,
        viewport: Size,
        bands: &B,
        hue: HueWindow,
        sink: &mut S,
    ) -> Result<(), S::Error>
    where
        B: FrequencyBandSource + ?Sized,
        S: RectDrawSink,
    {
        let smoothing = self.config.smoothing_factor;
        self.render_with_smoothing(viewport, bands, hue, sink, smoothing)
    }

    /// Like [`render`](Self::render), but rescales the smoothing factor to
    /// the time the frame actually took so the bars respond the same way at
    /// any frame rate.
    pub fn render_timed<B, S>(
        &mut self,
        viewport: Size,
        bands: &B,
        hue: HueWindow,
        sink: &mut S,
        elapsed_secs: f32,
    ) -> Result<(), S::Error>
    where
        B: FrequencyBandSource + ?Sized,
        S: RectDrawSink,
    {
        let smoothing = self
            .config
            .smoothing_for_elapsed(elapsed_secs, REFERENCE_FRAME_SECS);
        self.render_with_smoothing(viewport, bands, hue, sink, smoothing)
    }

    fn render_with_smoothing<B, S>(
        &mut self,
        viewport: Size,
        bands: &B,
        hue: HueWindow,
        sink: &mut S,
        smoothing: f32,
    ) -> Result<(), S::Error>
    where
        B: FrequencyBandSource + ?Sized,
        S: RectDrawSink,
    {
        let band_count = bands.band_count();
        if band_count == 0 {
            return Ok(());
        }
        if band_count != self.previous_heights.len() {
            self.resize(band_count);
        }

        self.update_peak(bands);

        let RenderConfig {
            rect_spacing,
            rect_width,
            rect_max_height,
            band_intensity,
            vertical_offset,
            ..
        } = self.config;
        // validate() keeps width + spacing and max height + spacing within i32.
        let spacing = rect_spacing as i32;
        let stride = rect_width as i32 + spacing;
        let max_height = rect_max_height as f32;

        let band_rect_size =
            stride.saturating_mul(i32::try_from(band_count).unwrap_or(i32::MAX));
        let start_x = ((viewport.width / 2) as i32).saturating_sub(band_rect_size / 2);
        let start_y = ((viewport.height / 2) as i32)
            .saturating_sub((rect_max_height / 2) as i32)
            .saturating_sub(vertical_offset);

        for (index, amplitude) in bands.bands() {
            let Some(previous) = self.previous_heights.get_mut(index) else {
                continue;
            };

            let target = if self.max_amplitude > 0.0 {
                let boosted = amplitude.max(0.0) * band_intensity;
                (boosted / self.max_amplitude * max_height)
                    .round()
                    .clamp(0.0, max_height)
            } else {
                0.0
            };
            let smoothed =
                (*previous * (1.0 - smoothing) + target * smoothing).clamp(0.0, max_height);
            *previous = smoothed;

            let height = smoothed.round() as u32;
            let offset = i32::try_from(index)
                .unwrap_or(i32::MAX)
                .saturating_mul(stride);
            let x = start_x.saturating_add(offset);
            let y = start_y.saturating_sub((height / 2) as i32);

            let ratio = smoothed / max_height;
            let color = hsv_to_rgb(hue.hue_at(ratio), 1.0, 1.0);

            let outline = Rectangle::new(
                Point::new(x.saturating_sub(spacing / 2), y.saturating_sub(spacing / 2)),
                Size::new(rect_width + rect_spacing, height + rect_spacing),
            );
            sink.fill_rect(outline, Rgb888::BLACK, OPAQUE)?;

            let bar = Rectangle::new(Point::new(x, y), Size::new(rect_width, height));
            sink.fill_rect(bar, color, OPAQUE)?;
        }

        Ok(())
    }

    /// Scans this frame's amplitudes into the rolling peak.
    fn update_peak<B>(&mut self, bands: &B)
    where
        B: FrequencyBandSource + ?Sized,
    {
        let frame_peak = bands
            .bands()
            .map(|(_, amplitude)| amplitude)
            .filter(|amplitude| amplitude.is_finite())
            .fold(0.0f32, f32::max);

        if let PeakTracking::Decay { factor } = self.config.peak_tracking {
            self.max_amplitude *= factor;
        }
        self.max_amplitude = self.max_amplitude.max(frame_peak);
    }

    fn resize(&mut self, band_count: usize) {
        synth_warn!(
            "SpectrumBarRenderer band count changed from {} to {}, resetting bars",
            self.previous_heights.len(),
            band_count
        );
        self.previous_heights.clear();
        self.previous_heights.resize(band_count, 0.0);
    }
}
