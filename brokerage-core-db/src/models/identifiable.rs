use uuid::Uuid;

/// Trait for entities that can be uniquely identified by a UUID
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Uuid;
}

/// Trait for entities that belong to exactly one workspace (tenant)
pub trait WorkspaceScoped {
    /// Returns the workspace every query for this entity is filtered by
    fn get_workspace_id(&self) -> Uuid;
}
