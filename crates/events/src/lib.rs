//! `simple-events` — in-process, type-routed publish/subscribe.
//!
//! Register [`Handler`]s per event type on a [`Dispatcher`], then broadcast
//! event values with `invoke`. Delivery is synchronous, in subscription order,
//! on the caller's thread.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;
pub mod system;

pub use config::DispatcherConfig;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use event::{Event, EventTypeId};
pub use handler::{Handler, HandlerError, HandlerId, HandlerResult};
pub use system::EventSystem;
