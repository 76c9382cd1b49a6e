//! Canvas 2D rendering of the pendulum
//!
//! Pure drawing: reads a `Snapshot` plus the rod length and paints the rod,
//! bob and a one-line HUD. All layout is in CSS pixels; the device-pixel
//! ratio is handled once in the context transform at resize time.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::bob_offset;
use crate::sim::Snapshot;

const BACKGROUND: &str = "#071018";
const ROD_COLOR: &str = "#bfcbd8";
const BOB_COLOR: &str = "#c84b4b";
const HUD_COLOR: &str = "#98a6b2";

/// Pivot sits this many CSS pixels below the top edge.
const PIVOT_DROP: f64 = 100.0;
/// Bob radius in CSS pixels.
const BOB_RADIUS: f64 = 14.0;
/// Longest rod the scale must accommodate (meters).
const MAX_LENGTH_M: f64 = 2.5;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Drawable size in CSS pixels
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }

    /// Match the backing store to the client size at the given device-pixel
    /// ratio; drawing keeps using CSS-pixel coordinates.
    pub fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
        let client_w = f64::from(canvas.client_width());
        let client_h = f64::from(canvas.client_height());
        canvas.set_width((client_w * dpr) as u32);
        canvas.set_height((client_h * dpr) as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.width = client_w;
        self.height = client_h;
    }

    /// Pixels per meter so the longest supported rod stays on screen.
    fn px_per_meter(&self) -> f64 {
        ((self.height - PIVOT_DROP - 2.0 * BOB_RADIUS) / MAX_LENGTH_M).max(1.0)
    }

    pub fn draw(&self, snapshot: &Snapshot, length_m: f64) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let pivot = Vec2::new((self.width / 2.0) as f32, PIVOT_DROP as f32);
        let px_len = (length_m * self.px_per_meter()) as f32;
        let bob = pivot + bob_offset(snapshot.theta, px_len);

        // Rod
        ctx.set_stroke_style_str(ROD_COLOR);
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(f64::from(pivot.x), f64::from(pivot.y));
        ctx.line_to(f64::from(bob.x), f64::from(bob.y));
        ctx.stroke();

        // Bob
        ctx.set_fill_style_str(BOB_COLOR);
        ctx.begin_path();
        let _ = ctx.arc(
            f64::from(bob.x),
            f64::from(bob.y),
            BOB_RADIUS,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();

        // HUD
        ctx.set_fill_style_str(HUD_COLOR);
        ctx.set_font("14px Arial");
        let _ = ctx.fill_text(
            &format!(
                "Oscillations: {} / {}",
                snapshot.oscillations, snapshot.target_oscillations
            ),
            12.0,
            self.height - 12.0,
        );
    }
}
