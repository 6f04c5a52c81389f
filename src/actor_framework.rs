use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Actions, and Events)
// =============================================================================

/// Errors raised by the framework itself, independent of any entity.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Event: Clone + Send + Sync + Debug + 'static;
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    // --- Event Hooks ---

    /// Events published once a freshly created entity is stored.
    fn created_events(&self) -> Vec<Self::Event> { Vec::new() }

    /// Events published after an action has been applied and stored.
    fn changed_events(_before: &Self, _after: &Self) -> Vec<Self::Event> { Vec::new() }
}

// =============================================================================
// 2. THE STORE
// =============================================================================

/// Outcome of a successful action: the handler's result, the stored snapshot,
/// and the events to publish.
#[derive(Debug)]
pub struct Applied<T: Entity> {
    pub result: T::ActionResult,
    pub entity: T,
    pub events: Vec<T::Event>,
}

/// Synchronous, insertion-ordered store. The actor owns one of these, but it is
/// usable on its own by single-threaded callers.
pub struct ResourceStore<T: Entity> {
    items: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceStore<T> {
    pub fn new(next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static) -> Self {
        Self {
            items: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        }
    }

    /// Builds, validates and stores a new entity. Nothing is stored on failure.
    pub fn create(&mut self, params: T::CreateParams) -> Result<(T, Vec<T::Event>), T::Error> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params)?;
        item.on_create()?;

        let events = item.created_events();
        self.insertion_order.push(id.clone());
        self.items.insert(id, item.clone());
        Ok((item, events))
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.get(id)
    }

    /// All entities in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &T> + '_ {
        self.insertion_order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies `action` to a copy of the entity and swaps it in only if the
    /// handler succeeds, so a failed action never leaves a partial update behind.
    pub fn perform_action(&mut self, id: &T::Id, action: T::Action) -> Result<Applied<T>, T::Error> {
        let current = self
            .items
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        let mut next = current.clone();
        let result = next.handle_action(action)?;
        let events = T::changed_events(current, &next);

        self.items.insert(id.clone(), next.clone());
        Ok(Applied { result, entity: next, events })
    }
}

// =============================================================================
// 3. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Subscribe {
        respond_to: Response<broadcast::Receiver<T::Event>, T::Error>,
    },
    Shutdown,
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: ResourceStore<T>,
    events: broadcast::Sender<T::Event>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        event_capacity: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(event_capacity);
        let actor = Self {
            receiver,
            store: ResourceStore::new(next_id_fn),
            events,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Subscribe before the actor is spawned, so no event is missed.
    pub fn subscribe(&self) -> broadcast::Receiver<T::Event> {
        self.events.subscribe()
    }

    pub async fn run(mut self) {
        let entity = std::any::type_name::<T>();
        info!(entity, "Resource actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let result = self.store.create(params).map(|(item, events)| {
                        debug!(id = %item.id(), "Item created");
                        self.publish(events);
                        item
                    });
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.list().cloned().collect();
                    debug!(count = items.len(), "Listed items");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.perform_action(&id, action) {
                        Ok(applied) => {
                            self.publish(applied.events);
                            Ok(applied.result)
                        }
                        Err(e) => {
                            warn!(id = %id, error = %e, "Action rejected");
                            Err(e)
                        }
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(Ok(self.events.subscribe()));
                }
                ResourceRequest::Shutdown => {
                    info!(entity, "Resource actor shutting down");
                    break;
                }
            }
        }

        info!(entity, items = self.store.len(), "Resource actor stopped");
    }

    fn publish(&self, events: Vec<T::Event>) {
        for event in events {
            // No subscribers is not an error.
            let _ = self.events.send(event);
        }
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    pub async fn subscribe(&self) -> Result<broadcast::Receiver<T::Event>, T::Error> {
        self.request(|respond_to| ResourceRequest::Subscribe { respond_to }).await
    }

    pub async fn shutdown(&self) -> Result<(), T::Error> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================
