//! The theme goods screen: an endlessly scrolling product grid.

pub mod command;
pub mod pager;
pub mod section;
pub mod sentinel;
pub mod view;
