use embedded_graphics::{
    geometry::{Point, Size},
    mock_display::MockDisplay,
    pixelcolor::{Rgb888, RgbColor},
};
use micro_synth::{
    hsv_to_rgb, BandAggregator, BandSpread, BinSummary, BinnedBandSource, DrawTargetSink,
    HueRotation, HueWindow, RecordingSink, RenderConfig, SpectrumBarRenderer,
};

#[test]
fn test_three_band_frame_matches_targets() {
    let config = RenderConfig::default()
        .with_rect_max_height(40)
        .with_band_intensity(1.0)
        .with_smoothing_factor(1.0);
    let mut renderer = SpectrumBarRenderer::initialize(3, config).unwrap();
    let mut sink = RecordingSink::new();

    renderer
        .render(
            Size::new(800, 600),
            &[10.0f32, 20.0, 5.0],
            HueWindow::default(),
            &mut sink,
        )
        .unwrap();

    assert_eq!(renderer.max_amplitude(), 20.0);
    assert_eq!(renderer.previous_heights(), &[20.0, 40.0, 10.0]);
}

#[test]
fn test_layout_is_centered_in_viewport() {
    let config = RenderConfig::default().with_rect_width(3).with_rect_spacing(1);
    let mut renderer = SpectrumBarRenderer::initialize(2, config).unwrap();
    let mut sink = RecordingSink::new();

    renderer
        .render(
            Size::new(800, 600),
            &[0.0f32, 0.0],
            HueWindow::default(),
            &mut sink,
        )
        .unwrap();

    let rects = sink.rects();
    assert_eq!(rects.len(), 4);
    // 600 / 2 - 40 / 2 - 200
    let start_y = 80;
    assert_eq!(rects[1].area.top_left, Point::new(396, start_y));
    assert_eq!(rects[3].area.top_left, Point::new(400, start_y));
    // spacing / 2 rounds down to zero for a one pixel gap.
    assert_eq!(rects[0].area.top_left, Point::new(396, start_y));
    assert_eq!(rects[0].area.size, Size::new(4, 1));
}

#[test]
fn test_bars_grow_around_center_line() {
    let config = RenderConfig::default()
        .with_rect_spacing(2)
        .with_band_intensity(1.0)
        .with_smoothing_factor(1.0)
        .with_vertical_offset(0);
    let mut renderer = SpectrumBarRenderer::initialize(1, config).unwrap();
    let mut sink = RecordingSink::new();

    renderer
        .render(Size::new(100, 100), &[3.0f32], HueWindow::default(), &mut sink)
        .unwrap();

    let (outline, bar) = (sink.rects()[0], sink.rects()[1]);
    let center_y = 100 / 2 - 40 / 2;
    assert_eq!(bar.area.size, Size::new(3, 40));
    assert_eq!(bar.area.top_left.y, center_y - 20);
    assert_eq!(outline.area.top_left, Point::new(bar.area.top_left.x - 1, center_y - 21));
    assert_eq!(outline.area.size, Size::new(5, 42));
    assert_eq!(outline.color, Rgb888::BLACK);
}

#[test]
fn test_draws_into_display() {
    let window = HueWindow::default();
    let config = RenderConfig::default()
        .with_rect_max_height(20)
        .with_band_intensity(1.0)
        .with_smoothing_factor(1.0)
        .with_vertical_offset(0);
    let mut renderer = SpectrumBarRenderer::initialize(4, config).unwrap();

    let mut display: MockDisplay<Rgb888> = MockDisplay::new();
    display.set_allow_overdraw(true);
    renderer
        .render(
            Size::new(64, 64),
            &[1.0f32, 2.0, 4.0, 0.0],
            window,
            &mut DrawTargetSink::new(&mut display),
        )
        .unwrap();

    // start_x = 32 - 16 / 2, start_y = 32 - 20 / 2; band 2 is full height.
    let peak_color = hsv_to_rgb(window.hue_at(1.0), 1.0, 1.0);
    assert_eq!(display.get_pixel(Point::new(32, 12)), Some(peak_color));
    assert_eq!(display.get_pixel(Point::new(34, 31)), Some(peak_color));
    assert_eq!(display.get_pixel(Point::new(35, 12)), Some(Rgb888::BLACK));
    // Silent band 3 only leaves its one pixel high outline.
    assert_eq!(display.get_pixel(Point::new(36, 22)), Some(Rgb888::BLACK));
    assert_eq!(display.get_pixel(Point::new(36, 23)), None);
}

#[test]
fn test_binned_source_drives_renderer() {
    let aggregator = BandAggregator::new(16, 4, BandSpread::Even).unwrap();
    let mut source = BinnedBandSource::new(aggregator, BinSummary::Max);
    let config = RenderConfig::default()
        .with_band_intensity(1.0)
        .with_smoothing_factor(1.0);
    let mut renderer = SpectrumBarRenderer::initialize(4, config).unwrap();
    let mut sink = RecordingSink::new();

    let mut bins = [0.0f32; 16];
    bins[1] = 2.0;
    bins[6] = 8.0;
    bins[13] = 4.0;
    source.update(&bins);

    renderer
        .render(Size::new(320, 240), &source, HueWindow::default(), &mut sink)
        .unwrap();

    assert_eq!(renderer.previous_heights(), &[10.0, 40.0, 0.0, 20.0]);
}

#[test]
fn test_rotating_hue_window_recolors_bars() {
    let config = RenderConfig::default()
        .with_band_intensity(1.0)
        .with_smoothing_factor(1.0);
    let mut renderer = SpectrumBarRenderer::initialize(1, config).unwrap();
    let mut rotation = HueRotation::default();
    let mut sink = RecordingSink::new();

    renderer
        .render(Size::new(320, 240), &[1.0f32], rotation.window(), &mut sink)
        .unwrap();
    let before = sink.rects()[1].color;

    sink.clear();
    let window = rotation.advance(10.0);
    renderer
        .render(Size::new(320, 240), &[1.0f32], window, &mut sink)
        .unwrap();
    let after = sink.rects()[1].color;

    assert_ne!(before, after);
    assert_eq!(after, hsv_to_rgb(window.hue_at(1.0), 1.0, 1.0));
}
