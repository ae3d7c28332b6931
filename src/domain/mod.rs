pub mod change_point;
pub mod event;
pub mod plot;
pub mod price;

pub use change_point::*;
pub use event::*;
pub use plot::*;
pub use price::*;
