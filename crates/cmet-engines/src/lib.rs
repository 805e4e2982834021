//! Compression engines and their registry

pub mod engine;
pub mod first_last;
pub mod none;
pub mod pipeline;
pub mod registry;
pub mod words;

pub use engine::CompressionEngine;
pub use first_last::FirstLastEngine;
pub use none::NoCompressionEngine;
pub use pipeline::PipelineEngine;
pub use registry::EngineRegistry;
