//! Immutable key/value context chain.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::ContextKey;

type AnyValue = dyn Any + Send + Sync;

/// Renders a stored value as JSON; `None` for values that fail to serialize.
type Render = fn(&AnyValue) -> Option<serde_json::Value>;

/// One binding in the chain, pointing at the frame it was derived from.
struct Frame {
    key: Box<dyn ContextKey>,
    value: Arc<AnyValue>,
    render: Option<Render>,
    parent: Option<Arc<Frame>>,
}

/// Immutable, chainable request context.
///
/// Cloning is cheap (one `Arc` bump). Deriving never mutates the receiver:
///
/// ```
/// use ctxlog_context::Context;
///
/// let parent = Context::background().with_value("user", "alice");
/// let child = parent.with_value("user", "bob");
///
/// assert_eq!(parent.value::<&str>(&"user"), Some(&"alice"));
/// assert_eq!(child.value::<&str>(&"user"), Some(&"bob"));
/// ```
///
/// # Thread Safety
///
/// Contexts are `Send + Sync` and can be handed to other threads freely.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Frame>>,
}

impl Context {
    /// Returns an empty root context.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a context with `key` bound to a serializable `value`.
    ///
    /// Values attached this way can be rendered as JSON with
    /// [`value_json`](Self::value_json), which is how they become log fields.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: ContextKey,
        V: Serialize + Send + Sync + 'static,
    {
        self.push(key, Arc::new(value), Some(render_json::<V>))
    }

    /// Derives a context with `key` bound to an arbitrary `value`.
    ///
    /// Opaque values can be read back with [`value`](Self::value) but are
    /// never rendered as JSON.
    #[must_use]
    pub fn with_opaque<K, V>(&self, key: K, value: V) -> Self
    where
        K: ContextKey,
        V: Any + Send + Sync,
    {
        self.push(key, Arc::new(value), None)
    }

    fn push(&self, key: impl ContextKey, value: Arc<AnyValue>, render: Option<Render>) -> Self {
        Self {
            head: Some(Arc::new(Frame {
                key: Box::new(key),
                value,
                render,
                parent: self.head.clone(),
            })),
        }
    }

    /// Finds the most recent frame bound under `key`.
    fn lookup(&self, key: &dyn ContextKey) -> Option<&Frame> {
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            if frame.key.key_eq(key) {
                return Some(frame);
            }
            current = frame.parent.as_deref();
        }
        None
    }

    /// Returns the value bound under `key`, if it has type `V`.
    ///
    /// Only the most recent binding for `key` is considered: if it holds a
    /// different type the result is `None`, older bindings are not searched.
    #[must_use]
    pub fn value<V: 'static>(&self, key: &dyn ContextKey) -> Option<&V> {
        self.lookup(key)?.value.downcast_ref::<V>()
    }

    /// Returns the value bound under `key` rendered as JSON.
    ///
    /// Returns `None` when the key is absent, when the value was attached
    /// with [`with_opaque`](Self::with_opaque), or when serialization fails.
    #[must_use]
    pub fn value_json(&self, key: &dyn ContextKey) -> Option<serde_json::Value> {
        let frame = self.lookup(key)?;
        let render = frame.render?;
        render(frame.value.as_ref())
    }

    /// Returns true if any frame is bound under `key`.
    #[must_use]
    pub fn contains(&self, key: &dyn ContextKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the number of frames in the chain, shadowed ones included.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            depth += 1;
            current = frame.parent.as_deref();
        }
        depth
    }

    /// Returns true for a context with no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

fn render_json<V: Serialize + 'static>(value: &AnyValue) -> Option<serde_json::Value> {
    let value = value.downcast_ref::<V>()?;
    serde_json::to_value(value).ok()
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            keys.push(&frame.key);
            current = frame.parent.as_deref();
        }
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}
