//! Notification template matching and extraction.

mod normalize;
mod parser;
pub mod registry;
pub mod templates;

pub use normalize::{clean_amount, combine_timestamp};
pub use parser::SmsParser;
pub use registry::{CombinedMatcher, RawMatch, TemplateRegistry, TemplateSet};
