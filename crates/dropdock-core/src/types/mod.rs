mod domain;
mod feed;
mod filter;
mod group;
mod session;

pub use domain::*;
pub use feed::*;
pub use filter::*;
pub use group::*;
pub use session::*;
