pub mod effect_service;
pub mod preview;

pub use effect_service::EffectService;
pub use preview::{PreviewFrame, PreviewRequest, PreviewWorker};
