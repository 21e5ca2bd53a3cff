//! Types shared between the scanner widget and anything else that speaks the
//! attendance endpoint's wire format.

pub mod model;
pub mod outcome;
pub mod requests;
