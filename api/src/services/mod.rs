// Business logic service implementations

pub mod address;
pub mod health;
pub mod statement;
