pub mod attempt;
pub mod input;
pub mod lesson;
pub mod result;
pub mod stats;
