//! Drawing modes and the pointer-gesture state machine.

use crate::config::AnnotatorConfig;
use crate::elements::{Element, ElementStyle, Font, TextMetrics};
use crate::eraser::Eraser;
use crate::session::Session;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available drawing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// Nothing selected yet; pointer events are ignored.
    #[default]
    None,
    Rectangle,
    Text,
    Freedraw,
    /// Reserved for the eraser toggle.
    Eraser,
}

impl DrawingMode {
    pub fn name(self) -> &'static str {
        match self {
            DrawingMode::None => "none",
            DrawingMode::Rectangle => "rectangle",
            DrawingMode::Text => "text",
            DrawingMode::Freedraw => "freedraw",
            DrawingMode::Eraser => "eraser",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "" | "none" => Some(DrawingMode::None),
            "rectangle" => Some(DrawingMode::Rectangle),
            "text" => Some(DrawingMode::Text),
            "freedraw" => Some(DrawingMode::Freedraw),
            "eraser" => Some(DrawingMode::Eraser),
            _ => None,
        }
    }
}

/// State of the current pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A rectangle or stroke is being drawn.
    Dragging {
        /// Where the press happened.
        anchor: Point,
        /// Index of the in-progress element in the session.
        element: usize,
    },
    /// Pointer is down in eraser mode; every move erases.
    Erasing,
    /// Text mode press is waiting for the host to supply the label.
    /// Other pointer input is ignored until [`GestureController::submit_text`].
    AwaitingText { anchor: Point },
}

/// What the caller must repaint after a gesture step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Full redraw of the surface.
    Full,
    /// Full redraw, then the element at this index drawn again on top.
    FullThenElement(usize),
}

/// Synchronous source of label text for text-mode presses.
///
/// Hosts that can block (e.g. a browser `prompt`) implement this; others leave
/// the controller in [`GestureState::AwaitingText`] and call
/// [`GestureController::submit_text`] when their dialog closes.
pub trait TextPrompt {
    /// Ask for label text at `anchor`. `None` means cancelled.
    fn request_text(&mut self, anchor: Point) -> Option<String>;
}

/// Turns press/move/release into element creation and mutation.
#[derive(Debug, Clone)]
pub struct GestureController {
    mode: DrawingMode,
    /// Mode to restore when the eraser is switched off. `Some` while engaged.
    saved_mode: Option<DrawingMode>,
    state: GestureState,
    /// Legacy stroke color recorded on new elements.
    pub stroke_color: String,
    /// Stroke width for new elements.
    pub stroke_width: f64,
    /// Render color for new elements.
    pub color: String,
    /// Font for text labels (also the label height used by the eraser).
    pub font: Font,
    pub eraser: Eraser,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::from_config(&AnnotatorConfig::default())
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnnotatorConfig) -> Self {
        Self {
            mode: DrawingMode::None,
            saved_mode: None,
            state: GestureState::Idle,
            stroke_color: config.stroke_color.clone(),
            stroke_width: config.stroke_width,
            color: config.stroke_color.clone(),
            font: config.font.clone(),
            eraser: Eraser::new(config.eraser_radius),
        }
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_eraser_engaged(&self) -> bool {
        self.saved_mode.is_some()
    }

    pub fn is_awaiting_text(&self) -> bool {
        matches!(self.state, GestureState::AwaitingText { .. })
    }

    /// Index of the element being drawn, if any.
    pub fn in_progress(&self) -> Option<usize> {
        match self.state {
            GestureState::Dragging { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Style captured by the next element created.
    pub fn current_style(&self) -> ElementStyle {
        ElementStyle::new(self.stroke_color.clone(), self.stroke_width, self.color.clone())
    }

    /// Switch drawing mode. Any gesture in progress ends; an element already
    /// appended stays in the session as it is.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        if mode == DrawingMode::Eraser {
            self.set_eraser(true);
            return;
        }
        // Picking a drawing mode while erasing disengages the eraser.
        self.saved_mode = None;
        self.mode = mode;
        self.reset();
        log::debug!("Drawing mode set to {}", mode.name());
    }

    /// Engage or disengage the eraser, restoring the previous mode when it
    /// is switched off.
    pub fn set_eraser(&mut self, engaged: bool) {
        match (engaged, self.saved_mode) {
            (true, None) => {
                self.saved_mode = Some(self.mode);
                self.mode = DrawingMode::Eraser;
            }
            (false, Some(previous)) => {
                self.saved_mode = None;
                self.mode = previous;
            }
            _ => return,
        }
        self.reset();
        log::debug!("Eraser {}, mode now {}", if engaged { "on" } else { "off" }, self.mode.name());
    }

    /// Flip the eraser. Returns whether it is now engaged.
    pub fn toggle_eraser(&mut self) -> bool {
        let engaged = !self.is_eraser_engaged();
        self.set_eraser(engaged);
        engaged
    }

    /// Drop any gesture in progress without touching the session.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Pointer pressed at `point`.
    pub fn press<I>(&mut self, session: &mut Session<I>, point: Point) -> Redraw {
        if self.is_awaiting_text() {
            log::debug!("Ignoring press while waiting for text input");
            return Redraw::None;
        }

        match self.mode {
            DrawingMode::None => {}
            DrawingMode::Eraser => {
                self.state = GestureState::Erasing;
            }
            DrawingMode::Rectangle => {
                let element = session.push(Element::rectangle(point, self.current_style()));
                self.state = GestureState::Dragging { anchor: point, element };
            }
            DrawingMode::Freedraw => {
                let element = session.push(Element::freedraw(point, self.current_style()));
                self.state = GestureState::Dragging { anchor: point, element };
            }
            DrawingMode::Text => {
                self.state = GestureState::AwaitingText { anchor: point };
            }
        }
        Redraw::None
    }

    /// Pointer moved to `point`.
    pub fn drag<I>(
        &mut self,
        session: &mut Session<I>,
        point: Point,
        metrics: &impl TextMetrics,
    ) -> Redraw {
        match self.state {
            GestureState::Dragging { anchor, element } => match session.element_mut(element) {
                Some(Element::Rectangle(rect)) => {
                    rect.set_extent(point.x - anchor.x, point.y - anchor.y);
                    Redraw::FullThenElement(element)
                }
                Some(Element::Freedraw(freedraw)) => {
                    freedraw.push_point(point);
                    Redraw::FullThenElement(element)
                }
                _ => {
                    log::warn!("In-progress element {} is gone, ending gesture", element);
                    self.reset();
                    Redraw::None
                }
            },
            GestureState::Erasing => {
                self.eraser.erase(session.elements_mut(), point, metrics, &self.font);
                Redraw::Full
            }
            GestureState::Idle | GestureState::AwaitingText { .. } => Redraw::None,
        }
    }

    /// Pointer released. The element drawn stays in the session.
    pub fn release(&mut self) -> Redraw {
        match self.state {
            GestureState::Dragging { .. } | GestureState::Erasing => self.reset(),
            GestureState::Idle | GestureState::AwaitingText { .. } => {}
        }
        Redraw::None
    }

    /// Finish a text-mode press. Empty or `None` text creates nothing.
    pub fn submit_text<I>(&mut self, session: &mut Session<I>, text: Option<&str>) -> Redraw {
        let GestureState::AwaitingText { anchor } = self.state else {
            return Redraw::None;
        };
        self.reset();

        match text.and_then(|text| Element::text(anchor, text, self.current_style())) {
            Some(element) => Redraw::FullThenElement(session.push(element)),
            None => {
                log::debug!("Text input empty or cancelled");
                Redraw::None
            }
        }
    }

    /// Press in text mode and immediately resolve the label through `prompt`.
    pub fn press_with_prompt<I>(
        &mut self,
        session: &mut Session<I>,
        point: Point,
        prompt: &mut dyn TextPrompt,
    ) -> Redraw {
        let redraw = self.press(session, point);
        if let GestureState::AwaitingText { anchor } = self.state {
            let text = prompt.request_text(anchor);
            return self.submit_text(session, text.as_deref());
        }
        redraw
    }
}
