use digitrec::{
    Canvas, CanvasConfig, Channel, DrawingSurface, ImageEncoder, IntensityGrid, PixelSampler, Point,
    Rgba,
};

fn draw_seven(canvas: &mut Canvas) {
    canvas.draw_polyline(&[Point::new(5.0, 4.0), Point::new(15.0, 4.0), Point::new(8.0, 17.0)]);
}

#[test]
fn test_round_trip_reproduces_intensities() {
    let mut canvas = Canvas::new(CanvasConfig {
        pen_width: 2.0,
        ..CanvasConfig::default()
    })
    .unwrap();
    draw_seven(&mut canvas);

    let encoder = ImageEncoder::default();
    let sampled = PixelSampler::sample(&canvas);
    let grid = encoder.intensities(&sampled);
    let decoded = encoder.encode(&sampled).decode(20, 20).unwrap();

    assert_eq!(decoded, grid);
    for y in 0..20 {
        for x in 0..20 {
            assert_eq!(decoded.get(x, y), canvas.pixel(x, y).b());
        }
    }
}

#[test]
fn test_round_trip_of_arbitrary_grid() {
    let bytes: Vec<u8> = (0..=255u8).chain(0..144).collect();
    let grid = IntensityGrid::from_bytes(20, 20, bytes.clone()).unwrap();
    let decoded = ImageEncoder::encode_grid(&grid).decode(20, 20).unwrap();
    assert_eq!(decoded.to_bytes(), bytes);
}

#[test]
fn test_encoding_is_deterministic() {
    let mut canvas = Canvas::default();
    draw_seven(&mut canvas);
    let sampled = PixelSampler::sample(&canvas);
    let encoder = ImageEncoder::default();
    assert_eq!(encoder.encode(&sampled), encoder.encode(&sampled));
}

#[test]
fn test_resampling_is_idempotent() {
    let mut canvas = Canvas::default();
    draw_seven(&mut canvas);
    let encoder = ImageEncoder::default();
    let first = encoder.intensities(&PixelSampler::sample(&canvas));
    let second = encoder.intensities(&PixelSampler::sample(&canvas));
    assert_eq!(first, second);
}

#[test]
fn test_blank_canvas_encodes_to_zeros() {
    let canvas = Canvas::default();
    let encoded = ImageEncoder::default().encode(&PixelSampler::sample(&canvas));
    assert_eq!(encoded.to_bytes().unwrap(), vec![0u8; 400]);
}

#[test]
fn test_encoded_size_matches_surface() {
    let canvas = Canvas::new(CanvasConfig {
        width: 28,
        height: 14,
        ..CanvasConfig::default()
    })
    .unwrap();
    let sampled = PixelSampler::sample(&canvas);
    assert_eq!((sampled.width(), sampled.height()), canvas.logical_size());
    let bytes = ImageEncoder::default().encode(&sampled).to_bytes().unwrap();
    assert_eq!(bytes.len(), 28 * 14);
}

#[test]
fn test_channel_follows_pen_color() {
    let mut canvas = Canvas::new(CanvasConfig {
        pen_color: Rgba::RED,
        ..CanvasConfig::default()
    })
    .unwrap();
    canvas.draw_line(Point::new(10.5, 2.5), Point::new(10.5, 17.5));
    let sampled = PixelSampler::sample(&canvas);

    let matching = ImageEncoder::for_pen(canvas.pen_color()).unwrap();
    assert_eq!(matching.channel(), Channel::Red);
    assert_eq!(matching.intensities(&sampled).get(10, 10), 255);

    // the blue channel carries nothing for a red pen
    let mismatched = ImageEncoder::new(Channel::Blue);
    assert!(mismatched.intensities(&sampled).to_bytes().iter().all(|&v| v == 0));

    // alpha sees every stroke regardless of color
    let alpha = ImageEncoder::new(Channel::Alpha);
    assert_eq!(alpha.intensities(&sampled).get(10, 10), 255);
}

#[test]
fn test_pointer_coordinates_land_on_expected_pixels() {
    let mut canvas = Canvas::default();
    let from = canvas.to_logical(105.0, 35.0, 0.0, 0.0);
    let to = canvas.to_logical(105.0, 175.0, 0.0, 0.0);
    canvas.draw_line(from, to);
    let grid = ImageEncoder::default().intensities(&PixelSampler::sample(&canvas));
    assert_eq!(grid.get(10, 10), 255);
    assert_eq!(grid.get(12, 10), 0);
}
