use uuid::Uuid;

/// Supplies the user a mutation is attributed to.
///
/// `None` means the change was made by the system and is logged without an
/// actor.
pub trait ActorResolver: Send + Sync {
    fn current_actor_id(&self) -> Option<Uuid>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemActor;

impl ActorResolver for SystemActor {
    fn current_actor_id(&self) -> Option<Uuid> {
        None
    }
}

/// Attributes every mutation to one user
#[derive(Debug, Clone, Copy)]
pub struct FixedActor(pub Uuid);

impl ActorResolver for FixedActor {
    fn current_actor_id(&self) -> Option<Uuid> {
        Some(self.0)
    }
}
