pub mod generator;

pub use generator::MarkdownGenerator;
