pub mod card;
pub mod cli;
pub mod logger;
pub mod rng;
pub mod shuffler;
