#[cfg(test)]
mod fake;
pub mod file;
pub mod group;
pub mod logout;
pub mod user;
