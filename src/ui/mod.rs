//! Terminal decoration
//!
//! Only the command layer uses this; the API client and renderer never do.

mod spinner;

pub use spinner::{create_spinner, finish_spinner};
