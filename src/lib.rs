//! # Retouch
//!
//! Non-destructive raster image editing. A session holds the image as it
//! was opened plus an ordered list of adjustments (brightness, contrast,
//! blurs, sharpen, flips, rotation). The edited image is recomputed from
//! that list on demand, and groups of adjustments are committed ("accept")
//! or discarded ("cancel") as transactions.
//!
//! # Architecture: Replayed Edit List
//!
//! ```text
//! open(file)  →  base ──┐
//!                       ├─ replay ─→ effective image ─→ display / histogram / save
//! set_attribute(..) → [ actions | commit | pending… ]
//! ```
//!
//! The base image is never modified after it is opened. Every query of the
//! effective image copies the base and applies the actions in order. This
//! keeps the preview a pure function of `(base, actions)`:
//!
//! - **No drift**: there is no incremental state to accumulate rounding error.
//! - **Scrubbing is exact**: dragging a slider from 20 to 10 gives the same
//!   pixels as setting 10 directly, because the later value replaces the
//!   earlier action rather than stacking on top of it.
//! - **Testability**: the transforms are stateless functions on
//!   [`PixelBuffer`](imaging::PixelBuffer), tested without a session.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | `EditSession` — base image, action list, watermark, accept/cancel, observers |
//! | [`imaging`] | Pixel buffer, transforms, action dispatch, codec + storage collaborators |
//! | [`notify`] | `ChangeNotifier` — owned, synchronous handler list |
//! | [`config`] | `retouch.toml` loading, validation, merging |
//! | [`error`] | `EditError` taxonomy |
//! | [`output`] | CLI output formatting — history and histogram reports |
//!
//! # Design Decisions
//!
//! ## Closed Set of Actions
//!
//! Every adjustment is a variant of [`EditAction`](imaging::EditAction) and
//! is dispatched by one exhaustive `match` in
//! [`imaging::operations::apply_action`]. Whether an action may be coalesced
//! is a property of its variant: geometric steps (flips, rotation) are
//! order-significant and always append, tone and filter steps replace the
//! previous pending step of the same kind.
//!
//! ## Attribute Names Are Loosely Coupled
//!
//! [`EditSession::set_attribute`](session::EditSession::set_attribute) takes
//! the attribute name as a string and silently ignores names it does not
//! know. Front ends can offer or drop affordances without the session
//! having to agree.
//!
//! ## Single Owner, Single Thread
//!
//! A session performs all work on the calling thread and has no internal
//! locking. Callers that share one across threads serialize access
//! themselves. Observers run synchronously inside the mutating call.

pub mod config;
pub mod error;
pub mod imaging;
pub mod notify;
pub mod output;
pub mod session;

pub use error::{EditError, Result};
pub use session::EditSession;

#[cfg(test)]
pub(crate) mod test_helpers;
