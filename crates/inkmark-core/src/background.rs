//! Background image load tracking.
//!
//! Image decoding happens outside the core and finishes asynchronously. Each
//! load request gets a [`LoadTicket`]; only the completion carrying the most
//! recent ticket is applied, so a slow earlier load cannot overwrite a newer one.

/// Identifies one background load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// The background image slot, generic over the surface's image type.
#[derive(Debug)]
pub struct Background<I> {
    image: Option<I>,
    generation: u64,
    pending: bool,
}

impl<I> Default for Background<I> {
    fn default() -> Self {
        Self {
            image: None,
            generation: 0,
            pending: false,
        }
    }
}

impl<I> Background<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load. The current image stops being drawn immediately.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.image = None;
        self.pending = true;
        LoadTicket(self.generation)
    }

    /// Apply a finished load. Returns `false` (and drops `image`) when the
    /// ticket has been superseded by a later request.
    pub fn complete(&mut self, ticket: LoadTicket, image: I) -> bool {
        if !self.is_current(ticket) {
            log::warn!(
                "Ignoring stale background image (load {} superseded by {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.image = Some(image);
        self.pending = false;
        true
    }

    /// Record a failed load. The background stays empty until the next load.
    /// Returns `false` for a superseded ticket.
    pub fn fail(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        log::warn!("Background image load {} failed", ticket.0);
        self.image = None;
        self.pending = false;
        true
    }

    /// Drop the image and invalidate any in-flight load.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.image = None;
        self.pending = false;
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.pending && ticket.0 == self.generation
    }

    /// Whether an image has finished loading and should be drawn.
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The loaded image, or `None` while nothing has finished loading.
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }
}
