// Adapters layer: concrete implementations of the domain ports
// (artifact formats, storage backends).

pub mod linear_model;
pub mod scaler;
pub mod storage;

pub use linear_model::{LinearKind, LinearModel};
pub use scaler::Scaler;
pub use storage::{LocalStorage, MemoryStorage};
