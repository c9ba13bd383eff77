//! Domain entities - the core business objects.

mod draft;
mod image;
mod post;
mod theme;

pub use draft::{Draft, FormField, ImageSelection, ImageTicket};
pub(crate) use draft::PendingImage;
pub use image::DataUri;
pub use post::{DEFAULT_TITLE, Post};
pub use theme::{Theme, UnknownTheme};
