//! Shape generation for 2D primitives
//!
//! Everything is emitted in field coordinates (pixels, top-left origin);
//! the pipeline maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{Background, DrawKind, Drawable, Scene};
use super::vertex::{Vertex, colors};
use crate::sim::{Rect, Tag};

/// Triangles per cloud puff
const PUFF_SEGMENTS: u32 = 16;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.x(), r.y(), r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// A cloud is four overlapping puffs hanging off its anchor point
pub fn cloud(anchor: Vec2) -> Vec<Vertex> {
    let puffs = [
        (Vec2::new(0.0, 0.0), 20.0),
        (Vec2::new(25.0, 0.0), 25.0),
        (Vec2::new(50.0, 0.0), 20.0),
        (Vec2::new(25.0, -15.0), 15.0),
    ];
    puffs
        .iter()
        .flat_map(|&(offset, radius)| circle(anchor + offset, radius, colors::CLOUD, PUFF_SEGMENTS))
        .collect()
}

fn offset_rect(base: &Rect, dx: f32, dy: f32, w: f32, h: f32) -> Rect {
    Rect::new(base.x() + dx, base.y() + dy, w, h)
}

/// Body with a head and a gun
fn player(r: &Rect) -> Vec<Vertex> {
    let mut vertices = rect(r, colors::PLAYER);
    vertices.extend(rect(&offset_rect(r, 5.0, 5.0, 10.0, 10.0), colors::DETAIL));
    vertices.extend(rect(&offset_rect(r, 20.0, 15.0, 15.0, 5.0), colors::GUN));
    vertices
}

/// Body with two eyes
fn hostile(r: &Rect) -> Vec<Vertex> {
    let mut vertices = rect(r, colors::HOSTILE);
    vertices.extend(rect(&offset_rect(r, 5.0, 5.0, 8.0, 8.0), colors::DETAIL));
    vertices.extend(rect(&offset_rect(r, 20.0, 5.0, 8.0, 8.0), colors::DETAIL));
    vertices
}

pub fn background(bg: &Background) -> Vec<Vertex> {
    let mut vertices = rect(&bg.ground, colors::GROUND);
    for anchor in &bg.clouds {
        vertices.extend(cloud(*anchor));
    }
    vertices
}

pub fn drawable(d: &Drawable) -> Vec<Vertex> {
    match d.kind {
        DrawKind::Player => player(&d.rect),
        DrawKind::Hostile => hostile(&d.rect),
        DrawKind::Shot(Tag::Friendly) => rect(&d.rect, colors::FRIENDLY_SHOT),
        DrawKind::Shot(Tag::Hostile) => rect(&d.rect, colors::HOSTILE_SHOT),
    }
}

/// Turn a whole scene into a triangle list, in draw order
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = background(&scene.background);
    for d in &scene.drawables {
        vertices.extend(drawable(d));
    }
    vertices
}
