//! The particle field: a fixed set of particles drifting around a viewport,
//! pushed away from the pointer and joined by faint lines when close.

use rand::Rng;
use vecmath::{vec2_add, vec2_square_len, vec2_sub};

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::surface::Surface;

/// A pair of particles close enough to be joined by a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub alpha: f64,
}

pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: PointerState,
    config: FieldConfig,
}

impl ParticleField {
    /// Seeds `config.particle_count(width)` particles from `rng`. The count
    /// never changes afterwards, resizes included.
    pub fn new<R: Rng + ?Sized>(width: f64, height: f64, config: FieldConfig, rng: &mut R) -> ParticleField {
        let count = config.particle_count(width);
        let particles = (0..count)
            .map(|_| Particle::spawn(rng, width, height, &config))
            .collect();
        ParticleField {
            width,
            height,
            particles,
            pointer: PointerState::new(config.influence_radius),
            config,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer.set(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.clear();
    }

    /// New viewport size. Particles keep their positions; any left outside
    /// drift back in through the usual edge reflection.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        let strength = self.config.repulsion_strength;
        for particle in &mut self.particles {
            particle.advance(width, height);
            if let Some(push) = self.pointer.push_from(particle.pos, strength) {
                particle.pos = vec2_add(particle.pos, push);
            }
        }
    }

    /// Every unordered pair closer than the connection distance, with the
    /// opacity its line is drawn at.
    pub fn connections(&self) -> Vec<Connection> {
        let max_dist = self.config.connection_distance;
        let max_dist_sq = max_dist * max_dist;
        let mut connections = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let dist_sq = vec2_square_len(vec2_sub(a.pos, b.pos));
                if dist_sq >= max_dist_sq {
                    continue;
                }
                let alpha = (1.0 - dist_sq.sqrt() / max_dist) * self.config.connection_opacity;
                connections.push(Connection { a: i, b: j, alpha });
            }
        }
        connections
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let color = self.config.color;
        surface.clear(self.width, self.height)?;
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, color, p.base_alpha)?;
        }
        for c in self.connections() {
            let (a, b) = (&self.particles[c.a], &self.particles[c.b]);
            surface.stroke_line(a.pos, b.pos, self.config.line_width, color, c.alpha)?;
        }
        Ok(())
    }

    /// One frame: update, then draw.
    pub fn step<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.update();
        self.render(surface)
    }
}
