#![no_std]
//! Audio-reactive spectrum bars.
//!
//! A [`SpectrumBarRenderer`] pulls one amplitude per frequency band from a
//! [`FrequencyBandSource`], normalizes it against a rolling peak, smooths it
//! into a bar height and draws a row of hue-graded bars into a
//! [`RectDrawSink`]. Any `embedded-graphics` draw target can act as the sink.
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "logging")]
use defmt_rtt as _;

macro_rules! synth_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "logging")]
        defmt::info!($fmt $(, $arg)*);
        #[cfg(feature = "std")]
        log::info!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "logging", feature = "std")))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

macro_rules! synth_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "logging")]
        defmt::warn!($fmt $(, $arg)*);
        #[cfg(feature = "std")]
        log::warn!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "logging", feature = "std")))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

pub mod band_aggregator;
pub mod band_source;
pub mod color;
pub mod config;
pub mod draw_sink;
pub mod spectrum_bar_renderer;

pub use band_aggregator::{BandAggregator, BandSpread, BinSummary};
pub use band_source::{BinnedBandSource, FrequencyBandSource};
pub use color::{hsv_to_rgb, HueRotation, HueWindow};
pub use config::{ConfigError, PeakTracking, RenderConfig};
pub use draw_sink::{DrawTargetSink, FilledRect, RecordingSink, RectDrawSink};
pub use spectrum_bar_renderer::SpectrumBarRenderer;
