pub mod constants;
pub mod pages;
pub mod validation;
pub mod test_helpers;
