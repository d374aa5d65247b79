pub mod chart;
pub mod help;
pub mod home;
pub mod map;
