use std::fmt;

/// One location or shelf as the robot client reports it: an opaque id plus
/// the display name an operator sees in the companion app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    pub id: String,
    pub name: String,
}

impl EntityInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// A script-supplied target, tagged by which form the script used. Scripts
/// may name a shelf or location either way; resolution happens in the client
/// against its last refreshed snapshot, never in the facade layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    ById(String),
    ByName(String),
}

impl EntityRef {
    /// Tags a raw script string against a snapshot. Ids win over names, so a
    /// shelf named after another shelf's id cannot shadow it.
    pub fn tag(target: &str, entries: &[EntityInfo]) -> Option<EntityRef> {
        if entries.iter().any(|e| e.id == target) {
            Some(EntityRef::ById(target.to_string()))
        } else if entries.iter().any(|e| e.name == target) {
            Some(EntityRef::ByName(target.to_string()))
        } else {
            None
        }
    }

    /// Looks up the entry this reference points at in the given snapshot.
    pub fn resolve<'a>(&self, entries: &'a [EntityInfo]) -> Option<&'a EntityInfo> {
        match self {
            EntityRef::ById(id) => entries.iter().find(|e| &e.id == id),
            EntityRef::ByName(name) => entries.iter().find(|e| &e.name == name),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::ById(id) => write!(f, "id:{id}"),
            EntityRef::ByName(name) => write!(f, "name:{name}"),
        }
    }
}

/// The id/name cache a client refreshes at the start of each run. Queries and
/// command resolution both read this snapshot, so a script observes one
/// consistent view of the map for the whole run.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    locations: Vec<EntityInfo>,
    shelves: Vec<EntityInfo>,
}

impl Resolver {
    pub fn refresh(&mut self, locations: Vec<EntityInfo>, shelves: Vec<EntityInfo>) {
        self.locations = locations;
        self.shelves = shelves;
    }

    pub fn locations(&self) -> &[EntityInfo] {
        &self.locations
    }

    pub fn shelves(&self) -> &[EntityInfo] {
        &self.shelves
    }

    pub fn location(&self, target: &str) -> Option<&EntityInfo> {
        EntityRef::tag(target, &self.locations).and_then(|r| r.resolve(&self.locations))
    }

    pub fn shelf(&self, target: &str) -> Option<&EntityInfo> {
        EntityRef::tag(target, &self.shelves).and_then(|r| r.resolve(&self.shelves))
    }
}

/// Outcome of one dispatched robot command. A `false` flag means the robot
/// rejected or failed the command; the bridge forwards it to the script as a
/// plain boolean and keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

/// Synchronous command/query facade over the robot. Every method blocks until
/// the robot has accepted or rejected the command. Targets arrive as raw
/// script strings; implementations resolve them (by id or by display name)
/// against the snapshot taken at the last `update_resolver` call.
///
/// A client outlives any bridge built on it and may back several bridges at
/// once; the bridge only borrows it through a shared handle.
pub trait RobotClient {
    /// Re-reads the robot's current location and shelf tables into the
    /// resolver snapshot. Called by the bridge before every run.
    fn update_resolver(&self);

    fn move_shelf(&self, shelf: &str, location: &str) -> CommandResult;
    fn return_shelf(&self, shelf: &str) -> CommandResult;
    fn dock_shelf(&self) -> CommandResult;
    fn undock_shelf(&self) -> CommandResult;
    fn move_to_location(&self, location: &str) -> CommandResult;
    fn return_home(&self) -> CommandResult;
    fn speak(&self, text: &str) -> CommandResult;

    fn get_locations(&self) -> Vec<EntityInfo>;
    fn get_shelves(&self) -> Vec<EntityInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<EntityInfo> {
        vec![EntityInfo::new("L01", "kitchen"), EntityInfo::new("L02", "dock")]
    }

    #[test]
    fn tags_ids_before_names() {
        let entries = snapshot();
        assert_eq!(EntityRef::tag("L01", &entries), Some(EntityRef::ById("L01".into())));
        assert_eq!(EntityRef::tag("kitchen", &entries), Some(EntityRef::ByName("kitchen".into())));
        assert_eq!(EntityRef::tag("pantry", &entries), None);
    }

    #[test]
    fn id_and_name_resolve_to_the_same_entry() {
        let entries = snapshot();
        let by_id = EntityRef::ById("L01".into()).resolve(&entries).expect("resolve by id");
        let by_name = EntityRef::ByName("kitchen".into()).resolve(&entries).expect("resolve by name");
        assert_eq!(by_id, by_name);
    }

    #[test]
    fn resolver_reads_only_the_refreshed_snapshot() {
        let mut resolver = Resolver::default();
        assert!(resolver.location("kitchen").is_none(), "empty before first refresh");

        resolver.refresh(snapshot(), Vec::new());
        assert_eq!(resolver.location("kitchen").map(|e| e.id.as_str()), Some("L01"));

        resolver.refresh(vec![EntityInfo::new("L01", "pantry")], Vec::new());
        assert!(resolver.location("kitchen").is_none(), "renamed away after refresh");
        assert_eq!(resolver.location("pantry").map(|e| e.id.as_str()), Some("L01"));
    }
}
