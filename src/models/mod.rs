pub mod document;
pub mod payload;
pub mod request;

pub use document::*;
pub use payload::*;
pub use request::*;
