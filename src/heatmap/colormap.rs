//! Yellow-Green-Blue colour ramp for heatmap cells
//!
//! Nine ColorBrewer YlGnBu stops, evenly spaced over [0, 1], with linear
//! interpolation between neighbours.

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const YLGNBU: &[Rgb] = &[
    Rgb::new(255, 255, 217),
    Rgb::new(237, 248, 177),
    Rgb::new(199, 233, 180),
    Rgb::new(127, 205, 187),
    Rgb::new(65, 182, 196),
    Rgb::new(29, 145, 192),
    Rgb::new(34, 94, 168),
    Rgb::new(37, 52, 148),
    Rgb::new(8, 29, 88),
];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Evaluate the ramp at normalized position `t`, clamped to [0, 1]
pub fn evaluate(t: f64) -> Rgb {
    let last = YLGNBU.len() - 1;
    if !(t > 0.0) {
        return YLGNBU[0];
    }
    if t >= 1.0 {
        return YLGNBU[last];
    }

    let pos = t * last as f64;
    let i = pos.floor() as usize;
    let frac = pos - i as f64;
    let (c1, c2) = (YLGNBU[i], YLGNBU[i + 1]);
    Rgb::new(lerp(c1.r, c2.r, frac), lerp(c1.g, c2.g, frac), lerp(c1.b, c2.b, frac))
}

/// Color for `count` on a scale whose darkest end is `max`
pub fn for_count(count: usize, max: usize) -> Rgb {
    if max == 0 {
        return evaluate(0.0);
    }
    evaluate(count as f64 / max as f64)
}
