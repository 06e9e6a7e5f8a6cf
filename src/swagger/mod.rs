pub mod fetch;
pub mod parse;

pub use fetch::load_spec_background;
