//! Notifications module
//!
//! In-process pub/sub for domain events. Delivery is fire-and-forget: the
//! bus never fails or rolls back the mutation that emitted the event.

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
