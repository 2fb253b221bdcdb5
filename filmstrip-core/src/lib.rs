//! Core library for assembling still photographs into a video slideshow by
//! driving an external command-line encoder.
//!
//! The renderer streams JPEG-encoded frames into the encoder's stdin
//! through a bounded feeder thread, so frame production never stalls on
//! process I/O. Output formats are strategies that translate a profile and
//! per-format properties into the concrete encoder invocation.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use filmstrip_core::{Aspect, FormatId, PropertyRegistry, RenderSession, VideoNorm};
//! use std::sync::Arc;
//!
//! let properties = Arc::new(PropertyRegistry::new());
//! let profile = filmstrip_core::find_profile("DVD", VideoNorm::Pal).unwrap();
//!
//! let mut session = RenderSession::new(
//!     FormatId::Dvd,
//!     profile,
//!     Aspect::Ratio4x3,
//!     "/path/to/output",
//!     properties,
//! );
//! session.prepare().unwrap();
//! for path in filmstrip_core::find_images("/path/to/photos".as_ref()).unwrap() {
//!     let image = image::open(&path).unwrap();
//!     session.submit_frame(&image).unwrap();
//! }
//! session.finalize().unwrap();
//! ```

pub mod audio;
pub mod discovery;
pub mod error;
pub mod feeder;
pub mod formats;
pub mod probe;
pub mod profile;
pub mod properties;
pub mod session;

// Re-exports for public API
pub use audio::AudioClip;
pub use discovery::find_images;
pub use error::{CoreError, CoreResult};
pub use feeder::{CancelToken, FrameFeeder};
pub use formats::{FormatId, RenderCommand, VideoFormat};
pub use profile::{Aspect, Profile, VideoNorm, find_profile, standard_profiles};
pub use properties::{
    DEFAULT_SENTINEL, PROP_BITRATE, PROP_FFOURCC, PROP_RENDER_SUBTITLE, PropertyRegistry,
};
pub use session::{RenderSession, SessionState};
