pub mod token;

pub use token::TokenStore;
