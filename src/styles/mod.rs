pub mod registry;

pub use registry::{StyleEntry, StyleRegistry, StyleSummary};
