//! Generated cover art.

use maud::{Markup, html};

/// Width of a generated cover.
const WIDTH: u32 = 300;
/// Height of a generated cover.
const HEIGHT: u32 = 400;

/// Render an SVG cover whose colour is derived from the title.
pub fn render(title: &str, author: &str) -> Markup {
    // Generate a color based on title hash for variety
    let hash = title
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    let hue = (hash % 360) as f32;
    let (r, g, b) = hsv_to_rgb(hue, 0.3, 0.4);
    let top = format!("rgb({},{},{})", r, g, b);
    let bottom = format!(
        "rgb({},{},{})",
        (r as f32 * 0.7) as u8,
        (g as f32 * 0.7) as u8,
        (b as f32 * 0.7) as u8
    );

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(WIDTH) height=(HEIGHT)
            viewBox=(format!("0 0 {} {}", WIDTH, HEIGHT)) {
            defs {
                linearGradient id="bg" x1="0" y1="0" x2="0" y2="1" {
                    stop offset="0" stop-color=(top) {}
                    stop offset="1" stop-color=(bottom) {}
                }
            }
            rect width="100%" height="100%" fill="url(#bg)" {}
            rect x="1" y="1" width=(WIDTH - 2) height=(HEIGHT - 2) fill="none"
                stroke="rgba(255,255,255,0.25)" {}
            text x="150" y="180" text-anchor="middle" fill="#fff"
                font-family="Georgia, serif" font-size="22" {
                (title)
            }
            text x="150" y="220" text-anchor="middle" fill="rgba(255,255,255,0.75)"
                font-family="Georgia, serif" font-size="14" {
                (author)
            }
        }
    }
}

/// Convert HSV to RGB.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
