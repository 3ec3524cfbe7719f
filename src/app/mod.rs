pub mod auth;
pub mod engagement;
pub mod feed;
pub mod matcher;
pub mod pantry;
pub mod posts;
pub mod search;
pub mod settings;
pub mod shopping;
