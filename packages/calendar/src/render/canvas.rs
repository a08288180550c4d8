//! Browser surface: a 2D canvas inside the element's shadow root.

use glam::Vec3;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, ShadowRoot, ShadowRootInit,
    ShadowRootMode,
};

use crate::systems::animation::mark_outline;

use super::camera::{Environment, Viewport};
use super::surface::{Frame, RenderSurface};

/// Pins the host as a fixed, full-viewport background layer that never takes
/// pointer input.
pub const HOST_STYLE: &str = ":host {
  position: fixed;
  top: 0;
  left: 0;
  width: 100vw;
  height: 100vh;
  z-index: -1;
  pointer-events: none;
}";

#[derive(Default)]
pub struct CanvasSurface {
    host: Option<HtmlElement>,
    canvas: Option<HtmlCanvasElement>,
    context: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a host element, adopting a canvas it already carries.
    pub fn attach(&mut self, host: HtmlElement) {
        if self.host.as_ref() == Some(&host) {
            return;
        }
        let existing = host
            .shadow_root()
            .and_then(|root| root.query_selector("canvas").ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let context = existing.as_ref().and_then(|c| context_2d(c).ok());
        self.canvas = if context.is_some() { existing } else { None };
        self.context = context;
        self.host = Some(host);
    }

    pub fn viewport_from_window() -> Result<Viewport, String> {
        let window = web_sys::window().ok_or("no window")?;
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Ok(Viewport::new(width as f32, height as f32))
    }

    fn shadow_root(host: &HtmlElement) -> Result<ShadowRoot, String> {
        if let Some(root) = host.shadow_root() {
            return Ok(root);
        }
        host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(js_err)
    }

    fn draw_mark(
        ctx: &CanvasRenderingContext2d,
        environment: &Environment,
        outline: &[Vec3],
        frame: &Frame<'_>,
        index: usize,
    ) {
        let mark = &frame.marks[index];
        let mut first = true;
        ctx.begin_path();
        for vertex in outline {
            let world = mark.transform.apply(*vertex);
            let Some((x, y)) = environment.camera.project(world, environment.viewport) else {
                continue;
            };
            if first {
                ctx.move_to(x as f64, y as f64);
                first = false;
            } else {
                ctx.line_to(x as f64, y as f64);
            }
        }
        ctx.close_path();

        // Marks for lived slices are solid; the rest are outlines.
        if mark.elapsed && !frame.settings.wireframe {
            ctx.fill();
        } else {
            ctx.stroke();
        }
    }
}

impl RenderSurface for CanvasSurface {
    fn has_surface(&self) -> bool {
        self.canvas.is_some()
    }

    fn create_surface(&mut self, environment: &Environment) -> Result<(), String> {
        let host = self.host.as_ref().ok_or("canvas surface has no host element")?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let root = Self::shadow_root(host)?;

        let style = document.create_element("style").map_err(js_err)?;
        style.set_text_content(Some(HOST_STYLE));
        root.append_child(&style).map_err(js_err)?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "created element is not a canvas".to_string())?;
        size_canvas(&canvas, environment.viewport);
        root.append_child(&canvas).map_err(js_err)?;

        let context = context_2d(&canvas)?;

        log::debug!(
            "created {}x{} canvas surface",
            canvas.width(),
            canvas.height()
        );
        self.canvas = Some(canvas);
        self.context = Some(context);
        Ok(())
    }

    fn resize(&mut self, environment: &Environment) -> Result<(), String> {
        let canvas = self.canvas.as_ref().ok_or("no canvas to resize")?;
        let (width, height) = (canvas.width(), canvas.height());
        size_canvas(canvas, environment.viewport);
        if (width, height) != (canvas.width(), canvas.height()) {
            log::debug!(
                "resized canvas {}x{} -> {}x{}",
                width,
                height,
                canvas.width(),
                canvas.height()
            );
        }
        Ok(())
    }

    fn submit_frame(&mut self, environment: &Environment, frame: &Frame<'_>) -> Result<(), String> {
        let ctx = self.context.as_ref().ok_or("no 2d context")?;
        let vp = environment.viewport;

        ctx.set_fill_style_str(&frame.settings.background_color.to_css());
        ctx.fill_rect(0.0, 0.0, vp.width as f64, vp.height as f64);

        let color = frame.settings.draw_color.to_css();
        ctx.set_fill_style_str(&color);
        ctx.set_stroke_style_str(&color);

        let outline = mark_outline(frame.settings);
        for index in 0..frame.marks.len() {
            Self::draw_mark(ctx, environment, &outline, frame, index);
        }
        Ok(())
    }
}

/// Setting either dimension wipes the bitmap, so unchanged sizes are skipped.
fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    let width = viewport.width.max(1.0) as u32;
    let height = viewport.height.max(1.0) as u32;
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or("2d context unavailable")?
        .dyn_into()
        .map_err(|_| "context is not a CanvasRenderingContext2d".to_string())
}

fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
