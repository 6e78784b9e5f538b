//! Request drafting
//!
//! Everything needed to turn a resource id into a ready-to-send deletion
//! request: the cookie store holding the anti-forgery value, the immutable
//! draft, the builder, and id normalisation for raw input.

mod builder;
mod cookies;
mod draft;
mod ids;

pub use builder::{FORM_CONTENT_TYPE, RequestBuilder};
pub use cookies::{CookieJar, CookieStore};
pub use draft::{HttpMethod, RequestDraft};
pub use ids::{parse_id_list, resource_id};
