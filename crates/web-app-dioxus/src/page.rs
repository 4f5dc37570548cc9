pub mod login;
pub mod not_found;
pub mod program;
pub mod root;
pub mod workouts;
