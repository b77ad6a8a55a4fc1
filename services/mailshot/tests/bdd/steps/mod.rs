//! BDD step definitions for the mailshot front-end

pub mod campaign_steps;
pub mod client_steps;
pub mod session_steps;
