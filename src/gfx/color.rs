//! Colour helpers shared by the demos.

/// `#ff69b4`, used for hover highlights.
pub const HOTPINK: [f32; 4] = rgb_hex(0xff69b4);
/// `#ffd700`
pub const GOLD: [f32; 4] = rgb_hex(0xffd700);
/// `#ff0000`, colour of drawn tubes.
pub const RED: [f32; 4] = rgb_hex(0xff0000);
pub const WHITE: [f32; 4] = rgb_hex(0xffffff);
pub const GREEN: [f32; 4] = rgb_hex(0x00ff00);
/// Grid centre lines.
pub const GRID_CENTRE: [f32; 4] = rgb_hex(0x666666);
/// Grid lines other than the centre ones.
pub const GRID_LINE: [f32; 4] = rgb_hex(0x999999);

/// Opaque colour from a `0xRRGGBB` literal.
pub const fn rgb_hex(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same colour with a different alpha.
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Converts HSL (hue in degrees, saturation and lightness in 0..=1) to opaque RGBA.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l, 1.0];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
        1.0,
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Hue picked deterministically from a world position, so shapes placed at
/// different spots get different colours.
pub fn hue_from_position(position: [f32; 3]) -> f32 {
    let [x, y, z] = position;
    (x * 1000.0 + y * 100.0 + z * 10.0).rem_euclid(360.0)
}

/// Colour of a placed shape: HSL(hue from position, 70%, 60%).
pub fn color_from_position(position: [f32; 3]) -> [f32; 4] {
    hsl_to_rgb(hue_from_position(position), 0.7, 0.6)
}
