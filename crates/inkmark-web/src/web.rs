//! WebAssembly entry point and the JavaScript-facing annotator.

use crate::callback::{Deferred, Delivery, try_deliver};
use crate::canvas::CanvasSurface;
use inkmark_core::{AnnotatorConfig, DrawingMode, LoadTicket, TextPrompt};
use inkmark_render::Annotator;
use kurbo::Point;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

type Shared = Rc<RefCell<Annotator<CanvasSurface>>>;

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Starting inkmark (WASM)");
}

/// Text prompt backed by `window.prompt`. Blocks the page until answered.
pub struct WindowPrompt;

impl TextPrompt for WindowPrompt {
    fn request_text(&mut self, _anchor: Point) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message("Enter text:") {
            Ok(text) => text,
            Err(e) => {
                log::warn!("window.prompt failed: {:?}", e);
                None
            }
        }
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Canvas annotator exposed to JavaScript.
///
/// Pointer coordinates are canvas-relative (`offsetX`/`offsetY`). Text-mode
/// presses use `window.prompt` unless [`set_window_prompt`](Self::set_window_prompt)
/// turns it off, in which case the page shows its own input and calls
/// [`submit_text`](Self::submit_text).
#[wasm_bindgen]
pub struct WebAnnotator {
    inner: Shared,
}

#[wasm_bindgen]
impl WebAnnotator {
    /// Attach to `canvas`. `config` is an optional JSON `AnnotatorConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<WebAnnotator, JsValue> {
        let config = match config {
            Some(json) => AnnotatorConfig::from_json(&json).map_err(js_error)?,
            None => AnnotatorConfig::default(),
        };

        let surface = CanvasSurface::new(canvas)?;
        surface.resize(config.width, config.height);
        let annotator = Annotator::new(surface, &config).with_text_prompt(Box::new(WindowPrompt));
        log::info!("Annotator ready ({}x{})", config.width, config.height);

        Ok(Self {
            inner: Rc::new(RefCell::new(annotator)),
        })
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&self, x: f64, y: f64) {
        self.inner.borrow_mut().pointer_down(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&self, x: f64, y: f64) {
        self.inner.borrow_mut().pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&self, x: f64, y: f64) {
        self.inner.borrow_mut().pointer_up(Point::new(x, y));
    }

    /// Select a drawing mode by name: `none`, `rectangle`, `text`,
    /// `freedraw` or `eraser`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode = DrawingMode::from_name(mode)
            .ok_or_else(|| js_error(format!("Unknown drawing mode: {}", mode)))?;
        self.inner.borrow_mut().set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.borrow().mode().name().to_string()
    }

    /// Flip the eraser. Returns whether it is now on.
    #[wasm_bindgen(js_name = toggleEraser)]
    pub fn toggle_eraser(&self) -> bool {
        self.inner.borrow_mut().toggle_eraser()
    }

    #[wasm_bindgen(js_name = setEraser)]
    pub fn set_eraser(&self, engaged: bool) {
        self.inner.borrow_mut().set_eraser(engaged);
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, color: &str) {
        self.inner.borrow_mut().set_color(color);
    }

    #[wasm_bindgen(js_name = setStrokeColor)]
    pub fn set_stroke_color(&self, color: &str) {
        self.inner.borrow_mut().set_stroke_color(color);
    }

    /// Use `window.prompt` for text-mode presses, or wait for `submitText`.
    #[wasm_bindgen(js_name = setWindowPrompt)]
    pub fn set_window_prompt(&self, enabled: bool) {
        let prompt: Option<Box<dyn TextPrompt>> = if enabled {
            Some(Box::new(WindowPrompt))
        } else {
            None
        };
        self.inner.borrow_mut().set_text_prompt(prompt);
    }

    #[wasm_bindgen(getter, js_name = awaitingText)]
    pub fn awaiting_text(&self) -> bool {
        self.inner.borrow().is_awaiting_text()
    }

    /// Finish a text-mode press. `undefined`, `null` or `""` cancels it.
    #[wasm_bindgen(js_name = submitText)]
    pub fn submit_text(&self, text: Option<String>) {
        self.inner.borrow_mut().submit_text(text.as_deref());
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    #[wasm_bindgen(js_name = saveJson)]
    pub fn save_json(&self) -> Result<String, JsValue> {
        self.inner.borrow().save().map_err(js_error)
    }

    /// Replace the drawing with a saved document. On error nothing changes.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&self, json: &str) -> Result<(), JsValue> {
        let request = self.inner.borrow_mut().load(json).map_err(js_error)?;
        if let Some(request) = request {
            load_image(&self.inner, request.ticket, &request.source)?;
        }
        Ok(())
    }

    /// Load `url` as the background image. A later call supersedes it.
    #[wasm_bindgen(js_name = loadBackground)]
    pub fn load_background(&self, url: &str) -> Result<(), JsValue> {
        let ticket = self.inner.borrow_mut().begin_background_load();
        log::info!("Loading background image {}", ticket.generation());
        load_image(&self.inner, ticket, url)
    }

    pub fn redraw(&self) {
        self.inner.borrow_mut().redraw();
    }
}

/// Start decoding `source` and report back to the annotator under `ticket`.
fn load_image(inner: &Shared, ticket: LoadTicket, source: &str) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;

    let onload = {
        let weak = Rc::downgrade(inner);
        let image = image.clone();
        Closure::once_into_js(move || {
            with_annotator(
                &weak,
                Box::new(move |annotator: &mut Annotator<CanvasSurface>| {
                    if !annotator.background_loaded(ticket, image) {
                        log::debug!("Dropped stale background image {}", ticket.generation());
                    }
                }),
            );
        })
    };

    let onerror = {
        let weak = Rc::downgrade(inner);
        Closure::once_into_js(move || {
            log::warn!("Background image {} failed to decode", ticket.generation());
            with_annotator(
                &weak,
                Box::new(move |annotator: &mut Annotator<CanvasSurface>| {
                    annotator.background_failed(ticket);
                }),
            );
        })
    };

    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));
    image.set_src(source);
    Ok(())
}

/// Run `f` on the annotator, retrying from a zero-delay timeout while it is
/// borrowed elsewhere.
fn with_annotator(weak: &Weak<RefCell<Annotator<CanvasSurface>>>, f: Deferred<Annotator<CanvasSurface>>) {
    let Delivery::Busy(f) = try_deliver(weak, f) else {
        return;
    };
    log::debug!("Annotator busy, retrying image callback");

    let weak = weak.clone();
    let retry = Closure::once_into_js(move || with_annotator(&weak, f));
    let queued = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(retry.unchecked_ref(), 0)
        });
    if let Err(e) = queued {
        log::warn!("Could not requeue image callback: {:?}", e);
    }
}
