//! # Generic Actor Server
//!
//! `ResourceActor` owns the rows of one backend resource and processes requests for
//! them one at a time. Sequential processing is what the rest of the crate relies on
//! for atomicity: a table claim, for example, is a single message and therefore can
//! never interleave with another claim on the same table.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "server" half of a resource. It owns the store and the receiver
/// end of the channel; every `ResourceClient` clone holds a sender. The store is a
/// `BTreeMap` so `List` returns rows in id order, which for generated ids is also
/// insertion order.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use table_pos::framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate(String);
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_update(&mut self, u: NoteUpdate, _: &()) -> Result<(), Self::Error> {
///         self.text = u.0;
///         Ok(())
///     }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> {
///         match a {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(NoteCreate("table 4 wants extra rice".into())).await.unwrap();
///     assert_eq!(id, 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Sale" rather than "table_pos::model::sale::Sale"
        let resource = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(resource, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(resource, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = self.check_conflicts(&item, None) {
                                warn!(resource, error = %e, "Create conflicts with a stored row");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            if let Err(e) = item.on_create(&context).await {
                                warn!(resource, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            // Ids are only consumed by rows that were actually stored.
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(resource, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(resource, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(resource, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let rows: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(resource, matched = rows.len(), "List");
                    let _ = respond_to.send(Ok(rows));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(resource, %id, ?update, "Update");
                    if let Some(item) = self.store.get(&id) {
                        // Hooks mutate a scratch copy so a rejected update leaves the row intact.
                        let mut candidate = item.clone();
                        let checked = match candidate.on_update(update, &context).await {
                            Ok(()) => self.check_conflicts(&candidate, Some(&id)),
                            Err(e) => Err(e),
                        };
                        if let Err(e) = checked {
                            warn!(resource, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.insert(id.clone(), candidate.clone());
                        info!(resource, %id, "Updated");
                        let _ = respond_to.send(Ok(candidate));
                    } else {
                        warn!(resource, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(resource, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(resource, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(resource, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(resource, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(resource, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let mut candidate = item.clone();
                        let result = candidate
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                *item = candidate;
                                info!(resource, %id, "Action ok")
                            }
                            Err(e) => warn!(resource, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(resource, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(resource, size = self.store.len(), "Shutdown");
    }

    /// Runs [`ActorEntity::check_conflict`] against every stored row except `skip`.
    fn check_conflicts(&self, candidate: &T, skip: Option<&T::Id>) -> Result<(), T::Error> {
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != skip)
            .try_for_each(|(_, existing)| candidate.check_conflict(existing))
    }
}
