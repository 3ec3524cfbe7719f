pub mod engagement;
pub mod pantry;
pub mod post;
pub mod settings;
pub mod space;
pub mod user;
