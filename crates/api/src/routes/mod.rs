pub mod health;
pub mod metrics;
pub mod practice;
pub mod simple_orders;
