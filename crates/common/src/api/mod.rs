pub mod assignments;
pub mod submissions;
