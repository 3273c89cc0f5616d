pub mod core;

pub use self::core::{Dataset, Language};
