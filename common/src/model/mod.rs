pub mod coordinates;
pub mod device;
pub mod employee;
pub mod token;
