mod audit;
mod identity;
mod time;

pub use self::{audit::*, identity::*, time::*};
