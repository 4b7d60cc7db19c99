//! Generation brief and provider response handling.
//!
//! [`StrategyBrief`] turns the form fields into a prompt and request body;
//! [`GenerationResponse`] turns the provider's answer into the strategy text
//! and images the assembler consumes. No network I/O happens here.

mod brief;
mod request;
mod response;

pub use brief::StrategyBrief;
pub use request::{
    DEFAULT_TEMPERATURE, GenerationConfig, GenerationRequest, RequestContent, RequestPart,
};
pub use response::{
    Candidate, CandidateContent, GenerationOutputs, GenerationResponse, InlineData, ResponsePart,
};
