pub mod budget;
pub mod refinancing;
pub mod snowball;
