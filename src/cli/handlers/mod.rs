pub mod config;
pub mod decode;
pub mod dict;
pub mod encode;
pub mod interactive;
pub mod number;
