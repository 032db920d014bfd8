// Simple particle struct to keep track of individual position, velocity, size and opacity

use rand::Rng;

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub base_alpha: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, base_alpha: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            base_alpha,
        }
    }

    /// Random particle somewhere inside a `width` x `height` viewport.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = rng.gen_range(-config.max_speed, config.max_speed);
        let vel_y = rng.gen_range(-config.max_speed, config.max_speed);
        let radius = rng.gen_range(config.min_radius, config.max_radius);
        let base_alpha = rng.gen_range(config.min_alpha, config.max_alpha);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, base_alpha)
    }

    /// Euler step of one frame, then flips any velocity component that is
    /// carrying the particle further outside `[0, width] x [0, height]`.
    /// The position itself is left where it landed. For a particle crossing
    /// an edge from inside this is the same as a plain sign flip.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        if (self.pos[0] < 0.0 && self.vel[0] < 0.0) || (self.pos[0] > width && self.vel[0] > 0.0) {
            self.vel[0] *= -1.0;
        }
        if (self.pos[1] < 0.0 && self.vel[1] < 0.0) || (self.pos[1] > height && self.vel[1] > 0.0) {
            self.vel[1] *= -1.0;
        }
    }
}
