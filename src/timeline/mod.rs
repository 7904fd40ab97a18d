//! Birth-rate ramp and fade-out state machine.

pub(crate) mod state;
