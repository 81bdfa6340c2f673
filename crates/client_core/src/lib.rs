pub mod error;
pub mod generator;
pub mod storefront;

pub use error::{GenerationError, GenerationErrorKind};
pub use generator::{
    GeminiImageClient, ImageGenerator, ImageServiceConfig, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use storefront::{
    BatchReport, FlowOptions, GenerationTarget, ItemOutcome, Storefront, StorefrontEvent,
};
