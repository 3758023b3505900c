use std::{
    error::Error,
    f32::consts::PI,
    thread,
    time::{Duration, Instant},
};

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use micro_synth::{
    BandAggregator, BandSpread, BinSummary, BinnedBandSource, DrawTargetSink, HueRotation,
    RenderConfig, SpectrumBarRenderer,
};

mod config;
use config::*;

/// Magnitude of one FFT bin for a kick pulsing at 2 Hz under three slowly
/// sweeping tones.
fn synthetic_magnitude(bin: usize, time: f32) -> f32 {
    let x = bin as f32 / NUM_FFT_BINS as f32;
    let beat = ((time * 2.0 * 2.0 * PI).sin() * 0.5 + 0.5).powi(4);
    let kick = (-x * 60.0).exp() * (0.4 + beat);

    let tones: f32 = [(0.7f32, 0.15f32), (1.3, 0.35), (2.1, 0.6)]
        .iter()
        .map(|&(rate, base)| {
            let center = base + 0.1 * (time * rate).sin();
            let distance = (x - center) / 0.02;
            let level = (time * rate * 3.0 + base * 10.0).sin() * 0.25 + 0.5;
            (-distance * distance).exp() * level
        })
        .sum();

    kick + tones
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));
    let mut window = Window::new("MicroSynth Simulator", &OutputSettingsBuilder::new().build());

    let aggregator = BandAggregator::new(
        NUM_FFT_BINS,
        NUM_BANDS,
        BandSpread::Exponential {
            exp_factor: BAND_SPREAD_FACTOR,
        },
    )?;
    let mut source = BinnedBandSource::new(aggregator, BinSummary::Max);

    let config = RenderConfig::default()
        .with_rect_width(RECT_WIDTH)
        .with_rect_spacing(RECT_SPACING)
        .with_rect_max_height(RECT_MAX_HEIGHT)
        .with_band_intensity(BAND_INTENSITY)
        .with_smoothing_factor(SMOOTHING_FACTOR);
    let mut renderer = SpectrumBarRenderer::initialize(NUM_BANDS, config)?;
    let mut hue = HueRotation::default();

    let mut bins = vec![0.0f32; NUM_FFT_BINS];
    let start = Instant::now();
    let mut last_frame = start;
    let mut frames = 0u32;

    'running: loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        let time = now.duration_since(start).as_secs_f32();

        for (i, bin) in bins.iter_mut().enumerate() {
            *bin = synthetic_magnitude(i, time);
        }
        source.update(&bins);

        display.clear(Rgb888::BLACK)?;
        let viewport = display.size();
        renderer.render_timed(
            viewport,
            &source,
            hue.advance(dt),
            &mut DrawTargetSink::new(&mut display),
            dt,
        )?;
        window.update(&display);

        frames = frames.wrapping_add(1);
        if frames % STATS_INTERVAL_FRAMES == 0 {
            let window_hue = hue.window();
            log::info!(
                "frame {}: peak {:.3}, hue window [{:.3}, {:.3}], dt {:.1}ms",
                frames,
                renderer.max_amplitude(),
                window_hue.min_hue,
                window_hue.max_hue,
                dt * 1000.0
            );
            log::debug!("bar heights: {:?}", renderer.previous_heights());
        }

        for event in window.events() {
            if let SimulatorEvent::Quit = event {
                break 'running;
            }
        }

        thread::sleep(Duration::from_millis(FRAME_DELAY_MS));
    }

    log::info!("simulator closed after {} frames", frames);
    Ok(())
}
