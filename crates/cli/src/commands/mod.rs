pub mod capture;
pub mod configure;
pub mod status;
