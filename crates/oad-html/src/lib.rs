pub mod generator;

pub use generator::HtmlGenerator;
