//! Math types for 2D UI geometry

/// 2D vector in screen pixels
pub type Vec2 = nalgebra::Vector2<f32>;

/// Packed `0xRRGGBBAA` color, the representation script callers pass around
pub type Color = u32;

/// Pack normalized RGBA components into a [`Color`]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> Color {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 24) | (channel(g) << 16) | (channel(b) << 8) | channel(a)
}
