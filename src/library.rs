//! Track catalog: enumerating playable files, matching them against
//! free-text queries and resolving their tag metadata.

mod matcher;
mod metadata;
mod model;
mod scan;

pub use matcher::matches;
pub use metadata::{CoverArt, TrackInfo, resolve};
pub use model::Track;
pub use scan::{Catalog, CatalogError};
