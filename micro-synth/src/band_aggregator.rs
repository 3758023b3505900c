use alloc::vec::Vec;

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::ConfigError;

/// How FFT bins are distributed over output bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandSpread {
    Even,
    /// Low bands get few bins, high bands many. Larger factors skew harder.
    Exponential { exp_factor: f32 },
}

/// Reduces the bins belonging to one band to a single amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinSummary {
    Average,
    /// Average weighted towards the upper bins of the band.
    WeightedAverage,
    #[default]
    Max,
    Rms,
}

impl BinSummary {
    pub fn summarize(&self, bins: &[f32]) -> f32 {
        if bins.is_empty() {
            return 0.0;
        }
        let count = bins.len() as f32;

        match self {
            BinSummary::Average => bins.iter().sum::<f32>() / count,
            BinSummary::Max => bins.iter().copied().fold(0.0, f32::max),
            BinSummary::Rms => (bins.iter().map(|&x| x * x).sum::<f32>() / count).sqrt(),
            BinSummary::WeightedAverage => {
                let (weighted, total) = bins
                    .iter()
                    .enumerate()
                    .fold((0.0f32, 0.0f32), |(sum, weight), (i, &x)| {
                        let w = i as f32 + 1.0;
                        (sum + x * w, weight + w)
                    });
                weighted / total
            }
        }
    }
}

/// Precomputed `[start, end)` bin ranges for each output band.
#[derive(Debug, Clone)]
pub struct BandAggregator {
    ranges: Vec<(usize, usize)>,
}

impl BandAggregator {
    pub fn new(bins_in: usize, bands_out: usize, spread: BandSpread) -> Result<Self, ConfigError> {
        if bands_out == 0 {
            return Err(ConfigError::NoBands);
        }
        if bins_in < bands_out {
            return Err(ConfigError::TooFewBins { bins_in, bands_out });
        }

        let ranges = match spread {
            BandSpread::Even => even_ranges(bins_in, bands_out),
            BandSpread::Exponential { exp_factor } => {
                if !(exp_factor > 0.0) {
                    return Err(ConfigError::InvalidSpreadFactor(exp_factor));
                }
                if (exp_factor - 1.0).abs() < f32::EPSILON {
                    // The curve degenerates to a straight line.
                    even_ranges(bins_in, bands_out)
                } else {
                    exponential_ranges(bins_in, bands_out, exp_factor)
                }
            }
        };

        Ok(Self { ranges })
    }

    pub fn band_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }

    /// Writes one summarized amplitude per band into `out`.
    ///
    /// Ranges reaching past the end of `bins` are clipped, so a short frame
    /// yields zeros for the missing bands instead of panicking.
    pub fn aggregate(&self, bins: &[f32], summary: BinSummary, out: &mut Vec<f32>) {
        out.clear();
        out.extend(self.ranges.iter().map(|&(start, end)| {
            let end = end.min(bins.len());
            let start = start.min(end);
            summary.summarize(&bins[start..end])
        }));
    }
}

fn even_ranges(bins_in: usize, bands_out: usize) -> Vec<(usize, usize)> {
    let band_size = bins_in / bands_out;
    (0..bands_out)
        .map(|i| {
            let start = i * band_size;
            let end = if i == bands_out - 1 {
                bins_in
            } else {
                start + band_size
            };
            (start, end)
        })
        .collect()
}

fn exponential_ranges(bins_in: usize, bands_out: usize, exp_factor: f32) -> Vec<(usize, usize)> {
    let boundary = |band: usize| -> usize {
        let fraction = band as f32 / bands_out as f32;
        let scaled = (exp_factor.powf(fraction) - 1.0) / (exp_factor - 1.0) * bins_in as f32;
        (scaled.max(0.0) as usize).min(bins_in)
    };
    (0..bands_out)
        .map(|i| {
            let end = if i == bands_out - 1 { bins_in } else { boundary(i + 1) };
            (boundary(i), end)
        })
        .collect()
}
