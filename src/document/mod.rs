//! Lottie document model, incremental builder and serializer.

pub mod builder;
pub mod model;
pub mod serialize;
