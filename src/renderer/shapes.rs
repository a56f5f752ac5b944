//! Frame tessellation into flat vertex lists

use glam::IVec2;

use super::vertex::{Vertex, colors, grey};
use crate::sim::{DrawShape, DrawStyle, Frame};

/// Vertex lists for one frame, drawn in field order: fills, then lines,
/// with stars underneath everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameMesh {
    /// Point list
    pub stars: Vec<Vertex>,
    /// Triangle list
    pub fills: Vec<Vertex>,
    /// Line list
    pub lines: Vec<Vertex>,
}

fn vertex(p: IVec2, color: [f32; 4]) -> Vertex {
    Vertex::new(p.x as f32, p.y as f32, color)
}

/// Closed outline as a line list: one segment per edge, last back to first
pub fn outline(points: &[IVec2], color: [f32; 4]) -> Vec<Vertex> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    if n == 2 {
        return segment(points[0], points[1], color);
    }

    let mut vertices = Vec::with_capacity(n * 2);
    for i in 0..n {
        vertices.push(vertex(points[i], color));
        vertices.push(vertex(points[(i + 1) % n], color));
    }
    vertices
}

pub fn segment(a: IVec2, b: IVec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![vertex(a, color), vertex(b, color)]
}

/// Triangle fan around `centre` as a triangle list. Correct for any outline
/// whose vertices are all visible from the centre, which holds for every
/// sprite shape.
pub fn fan(centre: IVec2, points: &[IVec2], color: [f32; 4]) -> Vec<Vertex> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(n * 3);
    for i in 0..n {
        vertices.push(vertex(centre, color));
        vertices.push(vertex(points[i], color));
        vertices.push(vertex(points[(i + 1) % n], color));
    }
    vertices
}

fn shape(mesh: &mut FrameMesh, shape: &DrawShape) {
    let color = grey(shape.brightness);
    match shape.style {
        DrawStyle::Filled => {
            mesh.fills.extend(fan(shape.centre, &shape.points, colors::FILL));
            mesh.lines.extend(outline(&shape.points, color));
        }
        DrawStyle::Outline => mesh.lines.extend(outline(&shape.points, color)),
        DrawStyle::Line => {
            if let &[a, b, ..] = &shape.points[..] {
                mesh.lines.extend(segment(a, b, color));
            }
        }
    }
}

/// Turn a frame snapshot into vertex lists
pub fn tessellate(frame: &Frame) -> FrameMesh {
    let mut mesh = FrameMesh {
        stars: frame.stars.iter().map(|&p| vertex(p, colors::STAR)).collect(),
        ..Default::default()
    };
    for s in &frame.shapes {
        shape(&mut mesh, s);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Detail;
    use crate::sim::{GamePhase, GameState, ShapeKind, TickInput, tick};

    fn pts(list: &[(i32, i32)]) -> Vec<IVec2> {
        list.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    #[test]
    fn test_outline_closes_loop() {
        let v = outline(&pts(&[(0, 0), (4, 0), (4, 4)]), grey(255));
        assert_eq!(v.len(), 6);
        assert_eq!(v[5].position, [0.0, 0.0]);
        assert!(outline(&pts(&[(1, 1)]), grey(255)).is_empty());
        assert_eq!(outline(&pts(&[(0, 0), (3, 3)]), grey(255)).len(), 2);
    }

    #[test]
    fn test_fan_triangle_count() {
        let v = fan(IVec2::ZERO, &pts(&[(0, -2), (2, 0), (0, 2), (-2, 0)]), colors::FILL);
        assert_eq!(v.len(), 12);
        assert!(v.iter().step_by(3).all(|v| v.position == [0.0, 0.0]));
    }

    #[test]
    fn test_tessellate_playing_frame() {
        let mut state = GameState::new(640, 480, 31);
        tick(&mut state, &TickInput { start: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Playing);

        let frame = Frame::capture(&state);
        let mesh = tessellate(&frame);
        assert_eq!(mesh.stars.len(), frame.stars.len());

        let edges: usize = frame.shapes.iter().map(|s| s.points.len()).sum();
        assert_eq!(mesh.lines.len(), edges * 2);
        // Ship and every rock are filled at high detail
        let filled = frame.count(ShapeKind::Rock) + frame.count(ShapeKind::Ship);
        assert!(filled > 0);
        let fanned: usize = frame
            .shapes
            .iter()
            .filter(|s| s.style == DrawStyle::Filled)
            .map(|s| s.points.len() * 3)
            .sum();
        assert_eq!(mesh.fills.len(), fanned);
    }

    #[test]
    fn test_low_detail_has_no_fills_or_stars() {
        let mut state = GameState::new(640, 480, 32);
        state.detail = Detail::Low;
        let mesh = tessellate(&Frame::capture(&state));
        assert!(mesh.fills.is_empty());
        assert!(mesh.stars.is_empty());
        assert!(!mesh.lines.is_empty());
    }
}
