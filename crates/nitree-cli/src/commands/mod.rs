pub mod conceal;
pub mod digest;
pub mod grow;
pub mod hash;
pub mod verify;
