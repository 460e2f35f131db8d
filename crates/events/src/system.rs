//! Event system abstraction (subscribe / unsubscribe / invoke).
//!
//! Components that publish or listen to events should depend on
//! [`EventSystem`] rather than on [`Dispatcher`] directly, so they can be
//! handed a shared dispatcher (`Arc<Dispatcher>`), a borrowed one, or a test
//! double.

use std::sync::Arc;

use crate::error::DispatchResult;
use crate::{Dispatcher, Event, Handler};

/// Type-routed publish/subscribe surface.
///
/// Semantics (as implemented by [`Dispatcher`]):
///
/// - `subscribe` appends; the same handler may be registered more than once
/// - `unsubscribe` removes one registration; unknown handlers are ignored
/// - `invoke` calls a snapshot of the handlers for `E`, in order, stopping at
///   the first failure
///
/// Absent arguments (`None`) fail with `DispatchError::InvalidArgument`.
pub trait EventSystem {
    fn subscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()>;

    fn unsubscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()>;

    fn invoke<E: Event>(&self, event: impl Into<Option<E>>) -> DispatchResult<()>;
}

impl EventSystem for Dispatcher {
    fn subscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()> {
        Dispatcher::subscribe::<E>(self, handler)
    }

    fn unsubscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()> {
        Dispatcher::unsubscribe::<E>(self, handler)
    }

    fn invoke<E: Event>(&self, event: impl Into<Option<E>>) -> DispatchResult<()> {
        Dispatcher::invoke::<E>(self, event)
    }
}

impl<S> EventSystem for Arc<S>
where
    S: EventSystem + ?Sized,
{
    fn subscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()> {
        (**self).subscribe::<E>(handler)
    }

    fn unsubscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()> {
        (**self).unsubscribe::<E>(handler)
    }

    fn invoke<E: Event>(&self, event: impl Into<Option<E>>) -> DispatchResult<()> {
        (**self).invoke::<E>(event)
    }
}

impl<S> EventSystem for &S
where
    S: EventSystem + ?Sized,
{
    fn subscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()> {
        (**self).subscribe::<E>(handler)
    }

    fn unsubscribe<E: Event>(&self, handler: impl Into<Option<Handler<E>>>) -> DispatchResult<()> {
        (**self).unsubscribe::<E>(handler)
    }

    fn invoke<E: Event>(&self, event: impl Into<Option<E>>) -> DispatchResult<()> {
        (**self).invoke::<E>(event)
    }
}
