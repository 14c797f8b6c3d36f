pub mod dto;
pub mod handler;
pub mod helpers;
pub mod seen_events;
