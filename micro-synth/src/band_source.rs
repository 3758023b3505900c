use alloc::vec::Vec;

use crate::band_aggregator::{BandAggregator, BinSummary};

/// A per-frame snapshot of frequency band amplitudes.
///
/// Implementors must hold still for the duration of one render call;
/// amplitudes are expected to be non-negative.
pub trait FrequencyBandSource {
    fn band_count(&self) -> usize;

    /// Amplitude of `band`, or `0.0` when it is out of range.
    fn amplitude_of(&self, band: usize) -> f32;

    /// `(index, amplitude)` pairs in index order.
    fn bands(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        (0..self.band_count()).map(move |i| (i, self.amplitude_of(i)))
    }
}

impl FrequencyBandSource for [f32] {
    fn band_count(&self) -> usize {
        self.len()
    }

    fn amplitude_of(&self, band: usize) -> f32 {
        self.get(band).copied().unwrap_or(0.0)
    }

    fn bands(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.iter().copied().enumerate()
    }
}

impl<const N: usize> FrequencyBandSource for [f32; N] {
    fn band_count(&self) -> usize {
        N
    }

    fn amplitude_of(&self, band: usize) -> f32 {
        self.as_slice().amplitude_of(band)
    }
}

impl FrequencyBandSource for Vec<f32> {
    fn band_count(&self) -> usize {
        self.len()
    }

    fn amplitude_of(&self, band: usize) -> f32 {
        self.as_slice().amplitude_of(band)
    }
}

/// Band amplitudes folded from a spectrum of FFT magnitude bins.
pub struct BinnedBandSource {
    aggregator: BandAggregator,
    summary: BinSummary,
    amplitudes: Vec<f32>,
}

impl BinnedBandSource {
    pub fn new(aggregator: BandAggregator, summary: BinSummary) -> Self {
        let amplitudes = alloc::vec![0.0; aggregator.band_count()];
        Self {
            aggregator,
            summary,
            amplitudes,
        }
    }

    /// Replaces the current snapshot with bands folded from `bins`.
    pub fn update(&mut self, bins: &[f32]) {
        self.aggregator
            .aggregate(bins, self.summary, &mut self.amplitudes);
    }

    pub fn amplitudes(&self) -> &[f32] {
        &self.amplitudes
    }
}

impl FrequencyBandSource for BinnedBandSource {
    fn band_count(&self) -> usize {
        self.amplitudes.len()
    }

    fn amplitude_of(&self, band: usize) -> f32 {
        self.amplitudes.amplitude_of(band)
    }
}
