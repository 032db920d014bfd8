mod utils;

pub mod anchor;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod menu;
pub mod navbar;
pub mod particle;
pub mod pointer;
pub mod reveal;
pub mod site;
pub mod submit;
pub mod surface;

use log::info;
use wasm_bindgen::prelude::*;
use web_sys::console;

pub use canvas::{start_particles, ParticleCanvas};
pub use config::FieldConfig;
pub use field::{Connection, ParticleField};
pub use particle::Particle;
pub use pointer::PointerState;
pub use site::start_site;
pub use surface::Surface;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
    info!("rk-service-web {}", env!("CARGO_PKG_VERSION"));
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
