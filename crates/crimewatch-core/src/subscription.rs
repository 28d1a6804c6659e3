use futures::stream::BoxStream;
use futures::StreamExt;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived message source managed by the runtime.
///
/// Models return subscriptions from
/// [`Model::subscriptions`](crate::Model::subscriptions) after every update.
/// The runtime compares ids with the previously active set, starting new
/// streams and aborting those that are gone. The feed uses this to run the
/// spinner timer only while the fetch is outstanding.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) stream: BoxStream<'static, Msg>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    kind: &'static str,
    key: String,
}

impl SubscriptionId {
    /// An id for a singleton source such as terminal input.
    pub fn named(kind: &'static str) -> Self {
        Self {
            kind,
            key: String::new(),
        }
    }

    /// An id for one of several sources of the same kind.
    pub fn keyed(kind: &'static str, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

/// A type that can be turned into a subscription stream.
pub trait SubscriptionSource: Send + 'static {
    /// Values the stream yields.
    type Output: Send + 'static;

    /// Identity of this source instance.
    fn id(&self) -> SubscriptionId;

    /// Consume the source and produce its stream.
    ///
    /// Nothing is started until the runtime polls the stream, so building a
    /// subscription on every update cycle is cheap.
    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// Wrap a [`SubscriptionSource`] as a subscription of its own output type.
pub fn subscribe<S: SubscriptionSource>(source: S) -> Subscription<S::Output> {
    Subscription {
        id: source.id(),
        stream: source.stream(),
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create from a raw stream and id.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription { id, stream }
    }

    /// The id this subscription is diffed by.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        Subscription {
            id: self.id,
            stream: self.stream.map(f).boxed(),
        }
    }
}

/// Keeps the set of running subscription tasks in line with what the model
/// last asked for.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Start subscriptions with new ids, abort ones that vanished, leave the
    /// rest running.
    pub fn reconcile(&mut self, wanted: Vec<Subscription<Msg>>) {
        let mut wanted: HashMap<SubscriptionId, Subscription<Msg>> =
            wanted.into_iter().map(|sub| (sub.id.clone(), sub)).collect();

        self.active.retain(|id, handle| {
            let keep = wanted.contains_key(id);
            if !keep {
                tracing::trace!(kind = id.kind, key = %id.key, "stopping subscription");
                handle.abort();
            }
            keep
        });

        for (id, sub) in wanted.drain() {
            if self.active.contains_key(&id) {
                continue;
            }
            tracing::trace!(kind = id.kind, key = %id.key, "starting subscription");
            let tx = self.msg_tx.clone();
            let mut stream = sub.stream;
            let handle = tokio::spawn(async move {
                while let Some(msg) = stream.next().await {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            });
            self.active.insert(id, handle.abort_handle());
        }
    }

    /// Abort all active subscriptions.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
