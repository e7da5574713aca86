//! Canvas2D rendering
//!
//! Pure output layer: reads a [`GameState`] and issues draw calls, never
//! mutates the simulation. The host skips the frame entirely when no 2D
//! context could be acquired.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::field_center;
use crate::sim::GameState;

const BG_COLOR: &str = "#2d2a32";
const LIGHT_FILL: &str = "rgba(255, 255, 200, 0.6)";
const LIGHT_CORE: &str = "rgba(255, 255, 255, 0.9)";
const LIGHT_RIM: &str = "rgba(255, 255, 200, 0)";
const WARNING_STROKE: &str = "red";
const PARTICLE_STROKE: &str = "#fff";

/// Owns the 2D context of the game canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// None if the canvas cannot hand out a 2D context yet
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one frame of the given state
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let center = field_center();

        ctx.clear_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);
        ctx.set_fill_style_str(BG_COLOR);
        ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

        self.draw_couch(center)?;
        self.draw_cat(center + Vec2::new(0.0, 10.0) + state.cat_jitter)?;
        self.draw_particles(state);
        for light in &state.lights {
            self.draw_light(light)?;
        }

        Ok(())
    }

    /// The couch in the middle of the room, with its floor shadow
    fn draw_couch(&self, center: Vec2) -> Result<(), JsValue> {
        let ctx = &self.ctx;

        ctx.set_fill_style_str("rgba(0,0,0,0.3)");
        ctx.begin_path();
        ctx.ellipse(
            center.x as f64,
            (center.y + 40.0) as f64,
            80.0,
            30.0,
            0.0,
            0.0,
            std::f64::consts::TAU,
        )?;
        ctx.fill();

        ctx.set_font("100px Arial");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text("🛋️", center.x as f64, center.y as f64)?;
        Ok(())
    }

    fn draw_cat(&self, pos: Vec2) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_font("60px Arial");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text("🐱", pos.x as f64, pos.y as f64)?;
        Ok(())
    }

    /// Scratch particles as short diagonal strokes
    fn draw_particles(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(PARTICLE_STROKE);
        ctx.set_line_width(2.0);
        for particle in &state.particles {
            ctx.begin_path();
            ctx.move_to(particle.pos.x as f64, particle.pos.y as f64);
            ctx.line_to((particle.pos.x + 5.0) as f64, (particle.pos.y - 5.0) as f64);
            ctx.stroke();
        }
    }

    /// A light is a radial gradient fading from a white core to nothing at
    /// the rim; touching lights get the red warning outline on top.
    fn draw_light(&self, light: &crate::sim::Light) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y) = (light.pos.x as f64, light.pos.y as f64);

        let gradient = ctx.create_radial_gradient(x, y, 10.0, x, y, light.radius as f64)?;
        gradient.add_color_stop(0.0, LIGHT_CORE)?;
        gradient.add_color_stop(0.5, LIGHT_FILL)?;
        gradient.add_color_stop(1.0, LIGHT_RIM)?;

        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.arc(x, y, light.radius as f64, 0.0, std::f64::consts::TAU)?;
        ctx.fill();

        if light.touching {
            ctx.set_stroke_style_str(WARNING_STROKE);
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.arc(x, y, light.radius as f64, 0.0, std::f64::consts::TAU)?;
            ctx.stroke();
        }
        Ok(())
    }
}
