use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod chars;
pub mod document;
pub mod history;
pub mod line_store;
pub mod movement;
pub mod position;
pub mod selection;
pub mod snapshot;
pub mod transaction;

pub type Tendril = SmartString<LazyCompact>;
