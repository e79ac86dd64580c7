//! Text and image classifiers that decide whether a car wash competes with
//! an express-tunnel operation, plus the shared gate that paces LLM calls.

pub mod azure;
pub mod error;
pub mod gate;
pub mod gemini;
pub mod keyword;
pub mod vision;

mod prompts;

pub use azure::AzureVisionClassifier;
pub use error::ClassifyError;
pub use gate::RateGate;
pub use gemini::GeminiKeywordClassifier;
pub use keyword::{KeywordClassifier, KeywordLabel, KeywordResult};
pub use vision::{
    load_images, ImageInput, VisionClassifier, VisionLabel, VisionResult, MAX_PLACE_PHOTOS,
};
