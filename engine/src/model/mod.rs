pub mod cases;
pub mod outcome;
pub mod request;
