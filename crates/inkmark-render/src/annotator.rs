//! Pointer input, session state and a surface wired together.

use crate::pipeline::RenderPipeline;
use crate::surface::Surface;
use inkmark_core::{
    AnnotatorConfig, DocumentError, DrawingMode, GestureController, ImageRequest, LoadTicket,
    Redraw, Session, TextPrompt,
};
use kurbo::Point;

/// An annotation session drawn on a surface.
///
/// Every method runs to completion on the caller's thread and leaves the
/// surface showing the current session. The only deferred work is background
/// image decoding, which the host reports back through
/// [`background_loaded`](Self::background_loaded) or
/// [`background_failed`](Self::background_failed).
pub struct Annotator<S: Surface> {
    surface: S,
    session: Session<S::Image>,
    controller: GestureController,
    pipeline: RenderPipeline,
    prompt: Option<Box<dyn TextPrompt>>,
}

impl<S: Surface> Annotator<S> {
    /// Create an annotator and paint the empty background.
    pub fn new(surface: S, config: &AnnotatorConfig) -> Self {
        let mut annotator = Self {
            surface,
            session: Session::new(),
            controller: GestureController::from_config(config),
            pipeline: RenderPipeline::from_config(config),
            prompt: None,
        };
        annotator.redraw();
        annotator
    }

    /// Resolve text-mode presses synchronously through `prompt` instead of
    /// waiting for [`submit_text`](Self::submit_text).
    pub fn with_text_prompt(mut self, prompt: Box<dyn TextPrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Install or remove the synchronous text prompt.
    pub fn set_text_prompt(&mut self, prompt: Option<Box<dyn TextPrompt>>) {
        self.controller.reset();
        self.prompt = prompt;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn session(&self) -> &Session<S::Image> {
        &self.session
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn mode(&self) -> DrawingMode {
        self.controller.mode()
    }

    pub fn pointer_down(&mut self, point: Point) {
        let redraw = match self.prompt.as_mut() {
            Some(prompt) => self
                .controller
                .press_with_prompt(&mut self.session, point, prompt.as_mut()),
            None => self.controller.press(&mut self.session, point),
        };
        self.apply(redraw);
    }

    pub fn pointer_move(&mut self, point: Point) {
        let redraw = self.controller.drag(&mut self.session, point, &self.surface);
        self.apply(redraw);
    }

    pub fn pointer_up(&mut self, _point: Point) {
        let redraw = self.controller.release();
        self.apply(redraw);
    }

    /// Complete a pending text-mode press. `None` cancels it.
    pub fn submit_text(&mut self, text: Option<&str>) {
        let redraw = self.controller.submit_text(&mut self.session, text);
        self.apply(redraw);
    }

    pub fn is_awaiting_text(&self) -> bool {
        self.controller.is_awaiting_text()
    }

    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.controller.set_mode(mode);
    }

    pub fn set_eraser(&mut self, engaged: bool) {
        self.controller.set_eraser(engaged);
    }

    pub fn toggle_eraser(&mut self) -> bool {
        self.controller.toggle_eraser()
    }

    /// Legacy stroke color recorded on new elements.
    pub fn set_stroke_color(&mut self, color: &str) {
        self.controller.stroke_color = color.to_string();
    }

    /// Render color for new elements.
    pub fn set_color(&mut self, color: &str) {
        self.controller.color = color.to_string();
    }

    /// Remove every element and repaint. The background image stays.
    pub fn clear(&mut self) {
        log::info!("Clearing {} elements", self.session.len());
        self.session.clear_elements();
        self.controller.reset();
        self.redraw();
    }

    /// Serialize the session together with a snapshot of the surface.
    pub fn save(&self) -> Result<String, DocumentError> {
        let image_data = self
            .surface
            .to_data_url()
            .map_err(|e| DocumentError::Snapshot(e.to_string()))?;
        let json = self.session.to_document(image_data).to_json()?;
        log::info!("Saved document with {} elements", self.session.len());
        Ok(json)
    }

    /// Load a saved document.
    ///
    /// A malformed document is logged and returned as an error with the
    /// session untouched. Otherwise the elements are replaced and, when the
    /// document embeds an image, the returned request must be decoded by the
    /// host; the repaint happens when that load finishes.
    pub fn load(&mut self, json: &str) -> Result<Option<ImageRequest>, DocumentError> {
        let request = self.session.load_json(json).inspect_err(|e| {
            log::warn!("Rejected document: {}", e);
        })?;

        self.controller.reset();
        if request.is_none() {
            self.redraw();
        }
        Ok(request)
    }

    /// Start loading a background image outside of a document load.
    pub fn begin_background_load(&mut self) -> LoadTicket {
        self.session.background_mut().begin_load()
    }

    /// Report a decoded background image. Returns `false` for a stale ticket.
    pub fn background_loaded(&mut self, ticket: LoadTicket, image: S::Image) -> bool {
        if !self.session.background_mut().complete(ticket, image) {
            return false;
        }
        log::debug!("Background image {} loaded", ticket.generation());
        self.redraw();
        true
    }

    /// Report a background image that could not be decoded.
    pub fn background_failed(&mut self, ticket: LoadTicket) -> bool {
        if !self.session.background_mut().fail(ticket) {
            return false;
        }
        self.redraw();
        true
    }

    pub fn redraw(&mut self) {
        self.pipeline.redraw(&mut self.surface, &self.session);
    }

    fn apply(&mut self, redraw: Redraw) {
        if redraw != Redraw::None {
            log::debug!("Redraw: {:?}", redraw);
        }
        self.pipeline.apply(&mut self.surface, &self.session, redraw);
    }
}
