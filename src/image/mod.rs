//! Image download, edit submission and result types.

pub mod edit;
pub mod fetch;
mod types;

pub use edit::{OpenAiEditor, OpenAiEditorBuilder};
pub use fetch::ImageFetcher;
pub use types::{EditedImage, FetchedImage, ImageFormat, DEFAULT_CONTENT_TYPE};
