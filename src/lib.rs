//! LeafCheck - leaf disease prediction upload page
//!
//! Browser front end for an image-classification service: pick or drop a leaf
//! photo, preview it, submit it and read back the predicted condition. All
//! behavior lives in [`leafcheck_core`]; this crate binds it to the DOM when
//! built for `wasm32`.

pub use leafcheck_core;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod shell;
#[cfg(target_arch = "wasm32")]
mod storage;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
