// Binds a ParticleField to an HtmlCanvasElement: 2d context, viewport
// sizing, pointer and resize listeners, and the requestAnimationFrame loop.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::field::ParticleField;
#[cfg(feature = "timing")]
use crate::Timer;

#[wasm_bindgen]
pub struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: ParticleField,
}

#[wasm_bindgen]
impl ParticleCanvas {
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<ParticleCanvas, JsValue> {
        let mut rng = StdRng::from_entropy();
        ParticleCanvas::build(canvas, config, &mut rng)
    }

    pub fn with_seed(canvas: HtmlCanvasElement, config: JsValue, seed: u64) -> Result<ParticleCanvas, JsValue> {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleCanvas::build(canvas, config, &mut rng)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field.resize(width, height);
        debug!("particle canvas resized to {}x{}", width, height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.field.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.field.clear_pointer();
    }

    pub fn frame(&mut self) -> Result<(), JsValue> {
        {
            #[cfg(feature = "timing")]
            let _timer = Timer::new("ParticleCanvas::update()");
            self.field.update();
        }
        #[cfg(feature = "timing")]
        let _timer = Timer::new("ParticleCanvas::render()");
        self.field.render(&mut self.context)
    }

    pub fn particle_count(&self) -> usize {
        self.field.particles().len()
    }

    pub fn width(&self) -> f64 {
        self.field.width()
    }

    pub fn height(&self) -> f64 {
        self.field.height()
    }
}

impl ParticleCanvas {
    fn build<R: Rng>(canvas: HtmlCanvasElement, config: JsValue, rng: &mut R) -> Result<ParticleCanvas, JsValue> {
        let config = FieldConfig::from_js(config)?;
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let (width, height) = viewport_size(&canvas);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let field = ParticleField::new(width, height, config, rng);
        info!(
            "particle field ready: {} particles in {}x{}",
            field.particles().len(),
            width,
            height
        );
        Ok(ParticleCanvas { canvas, context, field })
    }
}

/// Size of the element hosting the canvas, or the window when the parent
/// has not been laid out.
fn viewport_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    if let Some(parent) = canvas.parent_element() {
        let (w, h) = (parent.client_width(), parent.client_height());
        if w > 0 && h > 0 {
            return (w as f64, h as f64);
        }
    }
    web_sys::window()
        .and_then(|window| {
            let w = window.inner_width().ok()?.as_f64()?;
            let h = window.inner_height().ok()?.as_f64()?;
            Some((w, h))
        })
        .unwrap_or((canvas.width() as f64, canvas.height() as f64))
}

/// Creates the particle background on `canvas` and keeps it running for
/// the lifetime of the page.
#[wasm_bindgen]
pub fn start_particles(canvas: HtmlCanvasElement, config: JsValue) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let sim = Rc::new(RefCell::new(ParticleCanvas::new(canvas.clone(), config)?));
    listen_pointer(&window, &canvas, &sim)?;
    listen_resize(&window, &canvas, &sim)?;
    run_frames(&window, sim)
}

fn listen_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    sim: &Rc<RefCell<ParticleCanvas>>,
) -> Result<(), JsValue> {
    let on_move = {
        let canvas = canvas.clone();
        let sim = sim.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            let mut sim = sim.borrow_mut();
            if x >= 0.0 && y >= 0.0 && x <= rect.width() && y <= rect.height() {
                sim.set_pointer(x, y);
            } else {
                sim.clear_pointer();
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    // mouseout with no related target means the pointer left the window
    let on_out = {
        let sim = sim.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if event.related_target().is_none() {
                debug!("pointer left the page");
                sim.borrow_mut().clear_pointer();
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
    on_out.forget();
    Ok(())
}

fn listen_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    sim: &Rc<RefCell<ParticleCanvas>>,
) -> Result<(), JsValue> {
    let on_resize = {
        let canvas = canvas.clone();
        let sim = sim.clone();
        Closure::wrap(Box::new(move || {
            let (width, height) = viewport_size(&canvas);
            sim.borrow_mut().resize(width, height);
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

// The frame callback reschedules itself, so it holds a handle to its own
// closure. The cycle is never broken: the loop runs until the page goes away.
fn run_frames(window: &Window, sim: Rc<RefCell<ParticleCanvas>>) -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let frame_window = window.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(err) = sim.borrow_mut().frame() {
            error!("particle frame failed: {:?}", err);
        }
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(err) = frame_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                error!("could not schedule next particle frame: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    info!("particle animation started");
    Ok(())
}
