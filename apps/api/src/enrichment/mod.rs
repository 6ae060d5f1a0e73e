pub mod handlers;
pub mod normalizer;
pub mod pdf;
pub mod pipeline;
