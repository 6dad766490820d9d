//! Process bootstrap helpers run before any front end starts.

pub mod logger;
