pub mod screenshot;
pub mod section;
pub mod writeup;

pub use screenshot::Screenshot;
pub use section::{SectionType, WriteUpSection};
pub use writeup::{AppView, Difficulty, OperatingSystem, WriteUp};
