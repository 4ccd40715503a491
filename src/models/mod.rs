pub mod message;
pub mod place;
pub mod search_intent;
pub mod settings;
