//! The transactional edit pipeline.
//!
//! An [`EditSession`] holds the base image (as opened) and an ordered list
//! of [`EditAction`]s. The effective image is never stored: every query
//! replays the whole list over a fresh copy of the base, so the preview is a
//! pure function of `(base, actions)` and scrubbing a slider back to an
//! earlier value reproduces that value's output bit for bit.
//!
//! # Transactions
//!
//! ```text
//!  actions:  [ B50 | commit | C20 | S5 ]
//!                           ^ watermark = 2
//!            permanent ----- | ---- pending
//! ```
//!
//! - [`set_attribute`](EditSession::set_attribute) appends a pending action,
//!   or replaces the last pending one when it has the same coalescable kind.
//! - [`accept`](EditSession::accept) appends a commit marker and moves the
//!   watermark past it. Nothing is re-baked into the base.
//! - [`cancel`](EditSession::cancel) truncates back to the watermark.
//! - [`cancel_acceptance`](EditSession::cancel_acceptance) pulls the
//!   watermark back one slot and cancels, stripping the marker of the most
//!   recent accept. It is single-level: two accepts in a row leave two
//!   markers, and one call strips only the last.
//!
//! Observers registered with [`subscribe`](EditSession::subscribe) run after
//! every visible change (open, clear, edit, cancel) and pull fresh state from
//! the `&EditSession` they are handed.

use crate::error::{EditError, Result};
use crate::imaging::codec::{Codec, OutputFormat, Storage};
use crate::imaging::histogram::{Histogram, histogram};
use crate::imaging::operations::{TransformOptions, replay};
use crate::imaging::{AttributeKind, EditAction, PixelBuffer};
use crate::notify::{ChangeNotifier, SubscriptionId};
use std::path::Path;

#[derive(Debug, Default)]
pub struct EditSession {
    base: Option<PixelBuffer>,
    actions: Vec<EditAction>,
    watermark: usize,
    options: TransformOptions,
    notifier: ChangeNotifier<EditSession>,
}

impl EditSession {
    /// An empty session with no image open.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TransformOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register a change handler. Handlers run synchronously after each
    /// visible change, in subscription order.
    pub fn subscribe(&mut self, handler: impl Fn(&EditSession) + 'static) -> SubscriptionId {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn notify(&self) {
        self.notifier.publish(self);
    }

    // ========================================================================
    // Image lifecycle
    // ========================================================================

    /// Make `buffer` the base image, dropping every action.
    ///
    /// Zero-sized buffers and channel counts other than 1 or 3 are rejected
    /// with the session left as it was.
    pub fn open(&mut self, buffer: PixelBuffer) -> Result<()> {
        buffer.validate()?;
        log::debug!(
            "opened {}x{}x{} image",
            buffer.width(),
            buffer.height(),
            buffer.num_channels()
        );
        self.base = Some(buffer);
        self.actions.clear();
        self.watermark = 0;
        self.notify();
        Ok(())
    }

    /// Read and decode `path`, then [`open`](Self::open) it.
    ///
    /// I/O and decode failures leave the current session untouched.
    pub fn open_file(
        &mut self,
        path: &Path,
        codec: &impl Codec,
        storage: &impl Storage,
    ) -> Result<()> {
        let bytes = storage.read(path)?;
        let buffer = codec.decode(&bytes)?;
        self.open(buffer)
    }

    /// Encode the effective image and write it to `path`.
    ///
    /// The format is `format` if given, else inferred from the extension.
    pub fn save_file(
        &self,
        path: &Path,
        format: Option<OutputFormat>,
        codec: &impl Codec,
        storage: &impl Storage,
    ) -> Result<()> {
        let format = format
            .or_else(|| OutputFormat::from_path(path))
            .ok_or_else(|| {
                EditError::Encode(format!("cannot infer output format for {}", path.display()))
            })?;
        let image = self.effective_image().ok_or(EditError::NoImage)?;
        let bytes = codec.encode(&image, format)?;
        storage.write(path, &bytes)
    }

    /// Close the image ("new image").
    pub fn clear(&mut self) {
        self.base = None;
        self.actions.clear();
        self.watermark = 0;
        self.notify();
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Request an adjustment by attribute name.
    ///
    /// Unknown names are ignored, as are parametric attributes given no
    /// parameter. Parameters are clamped into the attribute's range.
    pub fn set_attribute(&mut self, kind: &str, parameter: Option<i64>) {
        let Ok(kind) = kind.parse::<AttributeKind>() else {
            log::debug!("ignoring unknown attribute '{kind}'");
            return;
        };
        match kind.action(parameter) {
            Some(action) => self.apply_action(action),
            None => log::warn!("attribute '{kind}' needs a parameter; ignored"),
        }
    }

    /// Append `action`, or coalesce it into the last pending action.
    ///
    /// Does nothing when no image is open. Commit markers are only written
    /// by [`accept`](Self::accept) and are ignored here.
    pub fn apply_action(&mut self, action: EditAction) {
        if self.base.is_none() {
            log::debug!("no image open; ignoring {action}");
            return;
        }
        if !action.applies_to_chained_result() {
            log::debug!("commit markers are written by accept(); ignoring");
            return;
        }

        // Only pending actions may be replaced
        let coalesce = action.is_coalescable()
            && self.actions.len() > self.watermark
            && self.actions.last().and_then(EditAction::kind) == action.kind();

        match self.actions.last_mut() {
            Some(last) if coalesce => {
                log::debug!("coalescing {last} -> {action}");
                *last = action;
            }
            _ => {
                log::debug!("appending {action}");
                self.actions.push(action);
            }
        }
        self.notify();
    }

    /// Commit everything pending. No pixels change, so observers are not
    /// notified.
    pub fn accept(&mut self) {
        if self.base.is_none() {
            return;
        }
        self.actions.push(EditAction::CommitMarker);
        self.watermark = self.actions.len();
        log::debug!("accepted; watermark at {}", self.watermark);
    }

    /// Undo the most recent [`accept`](Self::accept): step the watermark
    /// back over its marker and cancel.
    pub fn cancel_acceptance(&mut self) {
        if self.base.is_none() {
            return;
        }
        self.watermark = self.actions.len().saturating_sub(1);
        self.cancel();
    }

    /// Discard every action after the watermark.
    pub fn cancel(&mut self) {
        if self.base.is_none() {
            return;
        }
        let dropped = self.actions.len().saturating_sub(self.watermark);
        self.actions.truncate(self.watermark);
        log::debug!("cancelled {dropped} pending action(s)");
        self.notify();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The base image with every action replayed over it.
    pub fn effective_image(&self) -> Option<PixelBuffer> {
        self.base
            .as_ref()
            .map(|base| replay(base, &self.actions, &self.options))
    }

    /// Per-channel histogram of the effective image.
    pub fn histogram(&self) -> Option<Histogram> {
        self.effective_image().map(|image| histogram(&image))
    }

    pub fn has_image(&self) -> bool {
        self.base.is_some()
    }

    /// The image as opened, before any action.
    pub fn base(&self) -> Option<&PixelBuffer> {
        self.base.as_ref()
    }

    /// Every action, committed and pending, in application order.
    pub fn actions(&self) -> &[EditAction] {
        &self.actions
    }

    /// Index separating committed actions from pending ones.
    pub fn watermark(&self) -> usize {
        self.watermark
    }

    /// Number of actions a [`cancel`](Self::cancel) would discard.
    pub fn pending_count(&self) -> usize {
        self.actions.len() - self.watermark
    }
}
