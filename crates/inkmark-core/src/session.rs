//! Annotation session: the element list plus the background image state.

use crate::background::Background;
use crate::document::{DocumentError, ImageRequest, SerializedDocument};
use crate::elements::Element;

/// Everything a single annotation session owns.
///
/// Elements are kept in creation order, which is also paint order.
/// `I` is the image type of the surface the session is drawn on.
#[derive(Debug)]
pub struct Session<I> {
    elements: Vec<Element>,
    background: Background<I>,
}

impl<I> Default for Session<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Session<I> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            background: Background::new(),
        }
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub(crate) fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Append an element on top of the others. Returns its index.
    pub fn push(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remove every element. The background image is kept.
    pub fn clear_elements(&mut self) {
        self.elements.clear();
    }

    pub fn background(&self) -> &Background<I> {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut Background<I> {
        &mut self.background
    }

    /// Build the document written on save. `image_data` is the surface snapshot.
    pub fn to_document(&self, image_data: String) -> SerializedDocument {
        SerializedDocument {
            image_data,
            elements: self.elements.clone(),
        }
    }

    /// Parse `json` and, if it is a valid document, replace the elements and
    /// start loading its embedded image.
    ///
    /// On error nothing is changed. On success the returned request (if any)
    /// must be decoded by the host and reported back through
    /// [`Background::complete`] or [`Background::fail`].
    pub fn load_json(&mut self, json: &str) -> Result<Option<ImageRequest>, DocumentError> {
        let document = SerializedDocument::from_json(json)?;
        Ok(self.apply_document(document))
    }

    /// Replace the session contents with `document`.
    pub fn apply_document(&mut self, document: SerializedDocument) -> Option<ImageRequest> {
        log::info!("Loaded document with {} elements", document.elements.len());
        self.elements = document.elements;

        if document.image_data.is_empty() {
            self.background.clear();
            return None;
        }

        let ticket = self.background.begin_load();
        Some(ImageRequest {
            ticket,
            source: document.image_data,
        })
    }
}
