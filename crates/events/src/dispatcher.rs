//! In-process, type-keyed event dispatcher.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::config::DispatcherConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::{Event, EventTypeId, Handler};

/// Type-erased `Vec<Handler<E>>`, always stored under `EventTypeId::of::<E>()`.
type HandlerList = Box<dyn Any + Send + Sync>;

type Registry = HashMap<EventTypeId, HandlerList>;

fn handlers<E: Event>(slot: &HandlerList) -> DispatchResult<&Vec<Handler<E>>> {
    slot.downcast_ref::<Vec<Handler<E>>>()
        .ok_or(DispatchError::TypeMismatch(core::any::type_name::<E>()))
}

fn handlers_mut<E: Event>(slot: &mut HandlerList) -> DispatchResult<&mut Vec<Handler<E>>> {
    slot.downcast_mut::<Vec<Handler<E>>>()
        .ok_or(DispatchError::TypeMismatch(core::any::type_name::<E>()))
}

/// Synchronous pub/sub dispatcher keyed by event type.
///
/// - No IO / no async / no background threads
/// - Handlers for a type run in subscription order, on the caller's thread
/// - Each broadcast works on a snapshot of the handler list
/// - The first failing handler aborts the rest of that broadcast
///
/// ## Re-entrancy
///
/// The registry lock is held only while copying or mutating a handler list,
/// never while a handler runs. Handlers may therefore call `subscribe`,
/// `unsubscribe` or `invoke` on the same dispatcher. Such changes apply from
/// the next broadcast on.
///
/// ## Duplicates
///
/// Subscribing the same handler twice registers it twice (it is called twice
/// per broadcast). Each `unsubscribe` removes one registration.
pub struct Dispatcher {
    config: DispatcherConfig,
    registry: Mutex<Registry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            registry: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    fn registry(&self) -> DispatchResult<MutexGuard<'_, Registry>> {
        self.registry.lock().map_err(|_| DispatchError::Poisoned)
    }

    /// Register `handler` for events of type `E`.
    ///
    /// Fails with [`DispatchError::InvalidArgument`] if `handler` is `None`.
    pub fn subscribe<E: Event>(
        &self,
        handler: impl Into<Option<Handler<E>>>,
    ) -> DispatchResult<()> {
        let handler = handler
            .into()
            .ok_or(DispatchError::invalid_argument("handler"))?;
        let key = EventTypeId::of::<E>();

        let mut registry = self.registry()?;
        let slot = registry
            .entry(key)
            .or_insert_with(|| Box::new(Vec::<Handler<E>>::new()));
        let list = handlers_mut::<E>(slot)?;
        if self.config.trace {
            debug!(
                dispatcher = %self.config.name,
                event_type = %key,
                handler_id = %handler.id(),
                handlers = list.len() + 1,
                "subscribing handler"
            );
        }
        list.push(handler);
        Ok(())
    }

    /// Remove one registration of `handler` for events of type `E`.
    ///
    /// Removes the earliest matching registration only. Unsubscribing a
    /// handler that is not registered is a no-op.
    pub fn unsubscribe<E: Event>(
        &self,
        handler: impl Into<Option<Handler<E>>>,
    ) -> DispatchResult<()> {
        let handler = handler
            .into()
            .ok_or(DispatchError::invalid_argument("handler"))?;
        let key = EventTypeId::of::<E>();

        let mut registry = self.registry()?;
        let removed = match registry.get_mut(&key) {
            Some(slot) => {
                let list = handlers_mut::<E>(slot)?;
                list.iter().position(|h| *h == handler).map(|pos| {
                    list.remove(pos);
                    list.len()
                })
            }
            None => None,
        };
        let Some(remaining) = removed else {
            if self.config.trace {
                debug!(
                    dispatcher = %self.config.name,
                    event_type = %key,
                    handler_id = %handler.id(),
                    "handler not subscribed; nothing removed"
                );
            }
            return Ok(());
        };

        if self.config.trace {
            debug!(
                dispatcher = %self.config.name,
                event_type = %key,
                handler_id = %handler.id(),
                handlers = remaining,
                "unsubscribed handler"
            );
        }
        if remaining == 0 {
            registry.remove(&key);
        }
        Ok(())
    }

    /// Broadcast `event` to every handler currently registered for `E`.
    ///
    /// Fails with [`DispatchError::InvalidArgument`] if `event` is `None`, and
    /// with [`DispatchError::Handler`] carrying the first handler failure.
    /// Handlers after the failing one are not called.
    pub fn invoke<E: Event>(&self, event: impl Into<Option<E>>) -> DispatchResult<()> {
        let event = event
            .into()
            .ok_or(DispatchError::invalid_argument("event"))?;
        let key = EventTypeId::of::<E>();

        // Snapshot under the lock; the guard drops before any handler runs.
        let snapshot: Option<Vec<Handler<E>>> = {
            let registry = self.registry()?;
            registry
                .get(&key)
                .map(handlers::<E>)
                .transpose()?
                .cloned()
        };

        let Some(subscribers) = snapshot else {
            if self.config.trace {
                debug!(
                    dispatcher = %self.config.name,
                    event_type = %key,
                    "no subscribers; event not delivered"
                );
            }
            return Ok(());
        };

        if self.config.trace {
            debug!(
                dispatcher = %self.config.name,
                event_type = %key,
                handlers = subscribers.len(),
                "invoking event"
            );
        }

        for handler in &subscribers {
            if self.config.trace {
                debug!(
                    dispatcher = %self.config.name,
                    event_type = %key,
                    handler_id = %handler.id(),
                    "calling handler"
                );
            }
            handler.call(&event)?;
        }

        if self.config.trace {
            debug!(
                dispatcher = %self.config.name,
                event_type = %key,
                "finished calling handlers"
            );
        }
        Ok(())
    }

    /// Number of active registrations for `E` (duplicates counted).
    pub fn handler_count<E: Event>(&self) -> DispatchResult<usize> {
        let registry = self.registry()?;
        let list = registry
            .get(&EventTypeId::of::<E>())
            .map(handlers::<E>)
            .transpose()?;
        Ok(list.map_or(0, Vec::len))
    }

    pub fn has_subscribers<E: Event>(&self) -> DispatchResult<bool> {
        Ok(self.handler_count::<E>()? > 0)
    }

    /// Number of event types with at least one registration.
    pub fn event_type_count(&self) -> DispatchResult<usize> {
        Ok(self.registry()?.len())
    }

    /// Drop every registration.
    pub fn clear(&self) -> DispatchResult<()> {
        let mut registry = self.registry()?;
        if self.config.trace {
            debug!(
                dispatcher = %self.config.name,
                event_types = registry.len(),
                "clearing all subscriptions"
            );
        }
        registry.clear();
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_config(DispatcherConfig::default())
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let event_types = self.registry.lock().map(|r| r.len()).ok();
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("event_types", &event_types)
            .finish()
    }
}
