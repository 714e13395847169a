mod author;
mod book;
mod common;
mod order;

pub use self::{author::*, book::*, common::*, order::*};
