//! In-process hooks for ledger events.
//!
//! Other parts of the system can subscribe to order events (an order was uploaded, an accrual verdict was applied)
//! by registering a handler in [`EventHooks`]. These are local callbacks, not client notifications.
mod channel;
mod event_types;
mod hooks;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::*;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
