//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod slug;
pub mod category;
pub mod post;
pub mod comment;

pub use validation::ValidationError;
pub use slug::Slug;
pub use category::NewCategory;
pub use post::{deserialize_category_id, PostDraft};
pub use comment::NewComment;
