pub mod progression;
pub mod stage;

pub use progression::Thresholds;
pub use stage::Stage;
