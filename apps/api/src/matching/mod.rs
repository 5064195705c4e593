// Skill matching: career ranking and skill-gap analysis.
// matcher is pure and synchronous; handlers adapt it to HTTP.

pub mod handlers;
pub mod matcher;
pub mod models;
pub mod skill_input;
pub mod trends;
