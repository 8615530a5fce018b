pub mod builder;
pub mod connection;
pub mod document;
pub mod node;
pub mod parameters;

pub use builder::*;
pub use connection::*;
pub use document::*;
pub use node::*;
pub use parameters::*;
