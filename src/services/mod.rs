pub mod debounce;
pub mod favorites;
pub mod keywords;
pub mod providers;
pub mod renderer;
pub mod request_builder;
pub mod session;
pub mod strategy;

pub use session::Session;
