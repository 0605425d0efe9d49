// Output generation module

pub mod build;
pub mod templates;

pub use build::*;
pub use templates::*;
