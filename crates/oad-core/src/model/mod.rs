pub mod endpoint;
pub mod schema;
pub mod types;

pub use endpoint::*;
pub use schema::*;
pub use types::{ApiInfo, NormalizedName, Resource, ServerView, TemplateData};
