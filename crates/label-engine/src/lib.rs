//! Rendering engine for printable QR labels.
//!
//! Converts physical label sizes into pixel layouts, renders QR symbols,
//! resamples them to print size, draws captions and encodes the result as
//! PNG or JPEG.

pub mod bitmap_font;
pub mod compose;
pub mod encode;
pub mod font;
pub mod layout;
pub mod qr;
pub mod resize;
pub mod text;

// Re-exports for convenience
pub use compose::compose_label;
pub use encode::{EncodeError, OutputFormat, save_label};
pub use font::CaptionFont;
pub use layout::{LayoutError, PhysicalLayout, PixelLayout, mm_to_px};
pub use qr::QrError;
