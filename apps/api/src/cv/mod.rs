// CV document: types, reducer/store, and the validation boundary for
// LLM-produced data.

pub mod handlers;
mod lenient;
pub mod model;
pub mod store;
pub mod validation;

pub use model::CvData;
pub use store::{CvAction, CvWorkspace};
pub use validation::{normalize_for_portfolio, parse_extracted};
