pub mod client;
pub mod training;

pub use client::ClassifierClient;
