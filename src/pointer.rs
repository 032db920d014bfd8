// Pointer cell owned by the particle field. Input handlers write it through
// `set` and `clear`, the frame loop only reads it.

use vecmath::{vec2_len, vec2_scale, vec2_sub, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState {
    pos: Option<Vector2<f64>>,
    radius: f64,
}

impl PointerState {
    pub fn new(radius: f64) -> Self {
        PointerState { pos: None, radius }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.pos = Some([x, y]);
    }

    pub fn clear(&mut self) {
        self.pos = None;
    }

    pub fn position(&self) -> Option<Vector2<f64>> {
        self.pos
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Linear falloff: 1 at the pointer, 0 at the influence radius and beyond.
    pub fn force_at(&self, distance: f64) -> f64 {
        if distance >= self.radius {
            0.0
        } else {
            (self.radius - distance) / self.radius
        }
    }

    /// Offset that pushes a particle at `pos` away from the pointer, or
    /// `None` when there is no pointer, the particle is out of reach, or it
    /// sits exactly on the pointer.
    pub fn push_from(&self, pos: Vector2<f64>, strength: f64) -> Option<Vector2<f64>> {
        let pointer = self.pos?;
        let away = vec2_sub(pos, pointer);
        let distance = vec2_len(away);
        if distance <= 0.0 || distance >= self.radius {
            return None;
        }
        let force = self.force_at(distance);
        Some(vec2_scale(away, force * strength / distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_falls_off_linearly() {
        let pointer = PointerState::new(120.0);
        assert_eq!(pointer.force_at(0.0), 1.0);
        assert_eq!(pointer.force_at(60.0), 0.5);
        assert_eq!(pointer.force_at(90.0), 0.25);
        assert_eq!(pointer.force_at(120.0), 0.0);
        assert_eq!(pointer.force_at(500.0), 0.0);
    }

    #[test]
    fn absent_pointer_pushes_nothing() {
        let pointer = PointerState::new(120.0);
        assert_eq!(pointer.push_from([10.0, 10.0], 2.0), None);
    }

    #[test]
    fn pushes_away_along_the_line_to_the_pointer() {
        let mut pointer = PointerState::new(120.0);
        pointer.set(100.0, 100.0);
        // 30/40/50 triangle, force 70/120
        let push = pointer.push_from([130.0, 140.0], 2.0).unwrap();
        let magnitude = 2.0 * 70.0 / 120.0;
        assert!((push[0] - magnitude * 0.6).abs() < 1e-12);
        assert!((push[1] - magnitude * 0.8).abs() < 1e-12);
    }

    #[test]
    fn skips_particles_on_or_beyond_the_edges() {
        let mut pointer = PointerState::new(120.0);
        pointer.set(0.0, 0.0);
        assert_eq!(pointer.push_from([0.0, 0.0], 2.0), None);
        assert_eq!(pointer.push_from([120.0, 0.0], 2.0), None);
        assert!(pointer.push_from([119.0, 0.0], 2.0).is_some());
    }

    #[test]
    fn clear_makes_pointer_absent() {
        let mut pointer = PointerState::new(120.0);
        pointer.set(5.0, 6.0);
        assert_eq!(pointer.position(), Some([5.0, 6.0]));
        pointer.clear();
        assert_eq!(pointer.position(), None);
    }
}
