pub mod config;
pub mod inspect;
pub mod rename;
pub mod util;

pub use config::*;
pub use inspect::*;
pub use rename::*;
pub use util::*;
