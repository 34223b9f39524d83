//! Asset access handed to the engine at init time.

mod manager;

pub use manager::AssetManager;
