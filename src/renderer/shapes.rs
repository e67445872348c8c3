//! Triangle generation for confetti pieces

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::fx::{Particle, Shape};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let segments = segments.max(3);

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

/// Generate vertices for a quad given its corners in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> [Vertex; 6] {
    let [a, b, c, d] = corners;
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Corners of a fluttering square piece: anchored at `pos`, stretched toward
/// the wobble anchor and skewed along the tilt
pub fn square_corners(p: &Particle) -> [Vec2; 4] {
    let tilt = p.tilt_offset();
    let x1 = p.pos + tilt;
    let x2 = p.wobble_pos + tilt;
    [
        p.pos,
        Vec2::new(p.wobble_pos.x, x1.y),
        x2,
        Vec2::new(x1.x, p.wobble_pos.y),
    ]
}

/// Append the triangles for one piece of confetti
pub fn confetti_piece(p: &Particle, circle_segments: u32, out: &mut Vec<Vertex>) {
    let alpha = p.alpha();
    if alpha <= 0.0 {
        return;
    }
    let color = [p.color[0], p.color[1], p.color[2], alpha];

    match p.shape {
        Shape::Square => out.extend_from_slice(&quad(square_corners(p), color)),
        Shape::Circle => {
            // Oval squashed by the tilt, approximated by a circle of the mean radius
            let rx = (p.wobble_pos.x - p.pos.x).abs() * 0.6;
            let ry = (p.wobble_pos.y - p.pos.y).abs() * 0.6;
            let radius = ((rx + ry) / 2.0).max(p.random * p.scalar);
            out.extend(circle(p.pos, radius, color, circle_segments));
        }
    }
}

/// Triangles for every live piece
pub fn confetti(particles: &[Particle], circle_segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(particles.len() * 6);
    for p in particles {
        confetti_piece(p, circle_segments, &mut vertices);
    }
    vertices
}
