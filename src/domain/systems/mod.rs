pub mod impulse;
pub mod resupply;
