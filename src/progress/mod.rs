//! Terminal progress for one-shot commands.

pub mod spinner;

pub use spinner::create_action_spinner;
