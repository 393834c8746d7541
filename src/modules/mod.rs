pub mod auth;
pub mod carts;
pub mod classes;
pub mod enrollments;
pub mod instructors;
pub mod payments;
pub mod users;
