//! Gateway to the hosted chat model and recovery of structured filter
//! actions from its free-text answers.

pub mod action;
pub mod gateway;

pub use action::{extract_filter_action, FenceStrategy};
pub use gateway::{interpret_response, AssistantGateway, GatewaySettings};
