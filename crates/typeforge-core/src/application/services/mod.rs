//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a mock module" or "switch to live".

pub mod generate_service;
pub mod switch_service;

pub use generate_service::{
    GenerateService, GeneratedArtifact, MockRequest, ServiceRequest, TypesRequest,
};
pub use switch_service::{SwitchReport, SwitchService};
