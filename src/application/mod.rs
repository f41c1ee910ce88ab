pub mod composition;
pub mod errors;
pub mod pipeline;
pub mod planner;
pub mod ports;
pub mod quantize;
