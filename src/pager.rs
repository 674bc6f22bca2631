//! Paged browsing of long listings.
//!
//! `Pages` slices a list into fixed-size pages with continuous numbering;
//! `paginate` shows them and follows previous/next input from the user who
//! asked until nobody navigates for the configured timeout.

mod driver;
mod pages;

pub use driver::{PagerExit, paginate};
pub use pages::{Page, Pages};
