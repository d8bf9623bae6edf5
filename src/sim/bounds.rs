//! Derived paddle edge geometry
//!
//! Paddles store only a center and a size; the collision code works with the
//! edges nearest the bird. Edges are derived on demand every tick because the
//! paddles move - nothing here is cached.

use super::state::{Paddle, Side};

/// Axis-aligned edges of a paddle, from the bird's point of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleEdges {
    /// Top edge (smaller y)
    pub top: f32,
    /// Bottom edge (larger y)
    pub bottom: f32,
    /// The vertical edge facing the field center - the one the bird can hit
    pub inner: f32,
}

impl PaddleEdges {
    /// Derive the edges of a paddle from its center position and size
    pub fn of(paddle: &Paddle) -> Self {
        let half_h = paddle.size.y / 2.0;
        let half_w = paddle.size.x / 2.0;
        let inner = match paddle.side {
            Side::Player => paddle.pos.x + half_w,
            Side::Robot => paddle.pos.x - half_w,
        };
        Self {
            top: paddle.pos.y - half_h,
            bottom: paddle.pos.y + half_h,
            inner,
        }
    }

    /// Whether a y coordinate lies strictly between top and bottom
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        y > self.top && y < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn paddle(side: Side, x: f32, y: f32) -> Paddle {
        Paddle {
            side,
            pos: Vec2::new(x, y),
            size: Vec2::new(20.0, 100.0),
        }
    }

    #[test]
    fn test_player_inner_edge_faces_right() {
        let edges = PaddleEdges::of(&paddle(Side::Player, 40.0, 300.0));
        assert_eq!(edges.inner, 50.0);
        assert_eq!(edges.top, 250.0);
        assert_eq!(edges.bottom, 350.0);
    }

    #[test]
    fn test_robot_inner_edge_faces_left() {
        let edges = PaddleEdges::of(&paddle(Side::Robot, 760.0, 300.0));
        assert_eq!(edges.inner, 750.0);
    }

    #[test]
    fn test_edges_follow_paddle_movement() {
        let mut p = paddle(Side::Player, 40.0, 300.0);
        p.pos.y = 120.0;
        let edges = PaddleEdges::of(&p);
        assert_eq!(edges.top, 70.0);
        assert_eq!(edges.bottom, 170.0);
    }

    #[test]
    fn test_spans_y_is_strict() {
        let edges = PaddleEdges::of(&paddle(Side::Player, 40.0, 300.0));
        assert!(edges.spans_y(300.0));
        assert!(!edges.spans_y(250.0));
        assert!(!edges.spans_y(350.0));
        assert!(!edges.spans_y(100.0));
    }
}
