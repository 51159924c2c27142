pub mod catalog;
pub mod explore;
pub mod home;
pub mod providers;
