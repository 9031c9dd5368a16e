/// Describes one document collection exposed over HTTP.
///
/// The client-facing error messages are fixed per collection and never
/// include the underlying cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Collection name in the store, also the last path segment of the base path.
    pub name: &'static str,
    pub singular: &'static str,
}

pub const TERRITORIES: Collection = Collection {
    name: "territories",
    singular: "territory",
};

pub const VOTES: Collection = Collection {
    name: "votes",
    singular: "vote",
};

/// Every collection served by the API.
pub const ALL: [Collection; 2] = [TERRITORIES, VOTES];

pub const MISSING_NAME_MESSAGE: &str = "Must provide a name.";

impl Collection {
    pub fn base_path(&self) -> String {
        format!("/api/{}", self.name)
    }

    pub fn item_path(&self) -> String {
        format!("/api/{}/:id", self.name)
    }

    pub fn list_failed(&self) -> String {
        format!("Failed to get {}.", self.name)
    }

    pub fn create_failed(&self) -> String {
        format!("Failed to create new {}.", self.singular)
    }

    pub fn get_failed(&self) -> String {
        format!("Failed to get {}", self.singular)
    }

    pub fn update_failed(&self) -> String {
        format!("Failed to update {}", self.singular)
    }

    pub fn delete_failed(&self) -> String {
        format!("Failed to delete {}", self.singular)
    }
}
