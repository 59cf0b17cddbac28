pub mod clock;
pub mod demo_users;
pub mod models;
