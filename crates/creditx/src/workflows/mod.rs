pub mod assistant;
pub mod mortgage;
