use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Event;

/// Failure returned by a handler. Passed through `invoke` untouched.
pub type HandlerError = anyhow::Error;

/// Result type handlers return.
pub type HandlerResult = Result<(), HandlerError>;

type HandlerFn<E> = dyn Fn(&E) -> HandlerResult + Send + Sync;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a handler, used to find it again on unsubscribe.
///
/// Minted once per [`Handler::new`]; clones of a handler share it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

/// A subscriber callback for events of type `E`.
///
/// `Handler` is a cheap, cloneable reference to the callback. The dispatcher
/// keeps one clone per registration; the caller keeps another so it can
/// unsubscribe later. Two handlers are equal iff they came from the same
/// `Handler::new` call, so wrapping the same closure twice yields two distinct
/// handlers.
///
/// ## Usage Pattern
///
/// ```ignore
/// let on_created = Handler::new(|ev: &ItemCreated| {
///     println!("created {}", ev.name);
///     Ok(())
/// });
///
/// dispatcher.subscribe(on_created.clone())?;
/// dispatcher.invoke(ItemCreated { name: "widget".into() })?;
/// dispatcher.unsubscribe(on_created)?;
/// ```
pub struct Handler<E> {
    id: HandlerId,
    callback: Arc<HandlerFn<E>>,
}

impl<E: Event> Handler<E> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            id: HandlerId::next(),
            callback: Arc::new(callback),
        }
    }

    /// Wrap an infallible callback.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self::new(move |event: &E| {
            callback(event);
            Ok(())
        })
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Call the handler directly (bypassing any dispatcher).
    pub fn call(&self, event: &E) -> HandlerResult {
        (self.callback)(event)
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<E> PartialEq for Handler<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for Handler<E> {}

impl<E> core::fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("event_type", &core::any::type_name::<E>())
            .finish()
    }
}
