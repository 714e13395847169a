mod book;
mod order;

pub use self::{book::*, order::*};
