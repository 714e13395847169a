mod author;
mod book;
mod order;

pub use self::{author::*, book::*, order::*};
