use plotters::style::RGBColor;

/// The classic "jet" map: dark blue through cyan, yellow and red.
pub fn jet(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let channel = |offset: f64| {
        let value = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (value * 255.0).round() as u8
    };
    RGBColor(channel(3.0), channel(2.0), channel(1.0))
}

/// Position of `value` within `[min, max]`; flat ranges map to the middle.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}
