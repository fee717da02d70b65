pub mod client;
pub mod generator;
pub mod normalize;
pub mod prompts;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::*;
pub use generator::*;
pub use normalize::*;
pub use prompts::*;
