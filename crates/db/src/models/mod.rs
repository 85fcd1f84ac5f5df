pub mod project;
pub mod sequence;
pub mod sheet;
pub mod shot;
