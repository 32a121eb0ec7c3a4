pub mod convert;
pub mod countries;
pub mod session;
pub mod setup;
pub mod ui;
