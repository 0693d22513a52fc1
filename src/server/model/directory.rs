/// One server listed by the node directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: String,
    /// `host:port` address the server is currently reachable at.
    pub address: String,
}

impl DirectoryEntry {
    pub fn from_entity(entity: entity::static_instance::Model) -> Self {
        Self {
            id: entity.id,
            address: entity.address,
        }
    }
}
