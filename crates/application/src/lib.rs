//! Application orchestration layer for Bookcase.
//!
//! Everything here is pure state over an immutable [`Catalogue`]: filtering,
//! pagination, projection into render-ready items and selection lookups. The
//! rendering layer only ever talks to [`BrowserSession`].

mod filter;
mod pagination;
mod projector;
mod selection;
mod session;
mod store;

pub use filter::{MatchSet, apply, matches};
pub use pagination::PageState;
pub use projector::{PreviewItem, Projection, project};
pub use selection::{BookDetail, resolve};
pub use session::BrowserSession;
pub use store::Catalogue;
