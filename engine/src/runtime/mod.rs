pub mod clock;
pub mod dispatcher;
pub mod metrics;
pub mod state;
