use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::client::{CommandResult, EntityInfo, Resolver, RobotClient};

/// One command as it went out to the (simulated) robot, with targets already
/// resolved to canonical ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchedCommand {
    MoveShelf { shelf: String, location: String },
    ReturnShelf { shelf: String },
    DockShelf,
    UndockShelf,
    MoveToLocation { location: String },
    ReturnHome,
    Speak { text: String },
}

/// In-memory stand-in for the robot control client: live location/shelf
/// tables the caller may edit between runs, a resolver snapshot that only
/// moves on `update_resolver`, and a journal of every command dispatched.
#[derive(Debug, Default)]
pub struct SimulatedRobot {
    locations: Vec<EntityInfo>,
    shelves: Vec<EntityInfo>,
    resolver: Resolver,
    journal: Vec<DispatchedCommand>,
    refresh_count: usize,
    fail_all: bool,
}

impl SimulatedRobot {
    fn dispatch(&mut self, command: DispatchedCommand) -> CommandResult {
        debug!("dispatching {command:?}");
        self.journal.push(command);
        if self.fail_all {
            CommandResult::failed()
        } else {
            CommandResult::ok()
        }
    }
}

/// Cloneable shared handle, one underlying robot for any number of bridges.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRobotHandle(Rc<RefCell<SimulatedRobot>>);

impl SimulatedRobotHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor_plan(locations: Vec<EntityInfo>, shelves: Vec<EntityInfo>) -> Self {
        let handle = Self::new();
        handle.set_locations(locations);
        handle.set_shelves(shelves);
        handle
    }

    /// Replaces the live location table. Scripts keep seeing the old snapshot
    /// until the next run's resolver refresh.
    pub fn set_locations(&self, locations: Vec<EntityInfo>) {
        self.0.borrow_mut().locations = locations;
    }

    pub fn set_shelves(&self, shelves: Vec<EntityInfo>) {
        self.0.borrow_mut().shelves = shelves;
    }

    /// When set, every dispatched command reports `success = false`. The
    /// command is still journaled: the robot received it and failed it.
    pub fn set_fail_all(&self, fail: bool) {
        self.0.borrow_mut().fail_all = fail;
    }

    pub fn journal(&self) -> Vec<DispatchedCommand> {
        self.0.borrow().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.0.borrow_mut().journal.clear();
    }

    pub fn refresh_count(&self) -> usize {
        self.0.borrow().refresh_count
    }
}

impl RobotClient for SimulatedRobotHandle {
    fn update_resolver(&self) {
        let mut robot = self.0.borrow_mut();
        let locations = robot.locations.clone();
        let shelves = robot.shelves.clone();
        robot.resolver.refresh(locations, shelves);
        robot.refresh_count += 1;
    }

    fn move_shelf(&self, shelf: &str, location: &str) -> CommandResult {
        let mut robot = self.0.borrow_mut();
        let (Some(shelf), Some(location)) =
            (robot.resolver.shelf(shelf), robot.resolver.location(location))
        else {
            return CommandResult::failed();
        };
        let command =
            DispatchedCommand::MoveShelf { shelf: shelf.id.clone(), location: location.id.clone() };
        robot.dispatch(command)
    }

    fn return_shelf(&self, shelf: &str) -> CommandResult {
        let mut robot = self.0.borrow_mut();
        let Some(shelf) = robot.resolver.shelf(shelf) else {
            return CommandResult::failed();
        };
        let command = DispatchedCommand::ReturnShelf { shelf: shelf.id.clone() };
        robot.dispatch(command)
    }

    fn dock_shelf(&self) -> CommandResult {
        self.0.borrow_mut().dispatch(DispatchedCommand::DockShelf)
    }

    fn undock_shelf(&self) -> CommandResult {
        self.0.borrow_mut().dispatch(DispatchedCommand::UndockShelf)
    }

    fn move_to_location(&self, location: &str) -> CommandResult {
        let mut robot = self.0.borrow_mut();
        let Some(location) = robot.resolver.location(location) else {
            return CommandResult::failed();
        };
        let command = DispatchedCommand::MoveToLocation { location: location.id.clone() };
        robot.dispatch(command)
    }

    fn return_home(&self) -> CommandResult {
        self.0.borrow_mut().dispatch(DispatchedCommand::ReturnHome)
    }

    fn speak(&self, text: &str) -> CommandResult {
        self.0.borrow_mut().dispatch(DispatchedCommand::Speak { text: text.to_string() })
    }

    fn get_locations(&self) -> Vec<EntityInfo> {
        self.0.borrow().resolver.locations().to_vec()
    }

    fn get_shelves(&self) -> Vec<EntityInfo> {
        self.0.borrow().resolver.shelves().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> SimulatedRobotHandle {
        let handle = SimulatedRobotHandle::with_floor_plan(
            vec![EntityInfo::new("L01", "kitchen")],
            vec![EntityInfo::new("S01", "pantry shelf")],
        );
        handle.update_resolver();
        handle
    }

    #[test]
    fn commands_journal_canonical_ids() {
        let robot = handle();
        assert!(robot.move_shelf("pantry shelf", "L01").success);
        assert!(robot.move_to_location("kitchen").success);
        assert_eq!(
            robot.journal(),
            vec![
                DispatchedCommand::MoveShelf { shelf: "S01".into(), location: "L01".into() },
                DispatchedCommand::MoveToLocation { location: "L01".into() },
            ]
        );
    }

    #[test]
    fn unknown_targets_fail_without_dispatch() {
        let robot = handle();
        assert!(!robot.move_to_location("garage").success);
        assert!(robot.journal().is_empty());
    }

    #[test]
    fn fail_all_still_journals_the_dispatch() {
        let robot = handle();
        robot.set_fail_all(true);
        assert!(!robot.speak("hello").success);
        assert_eq!(robot.journal(), vec![DispatchedCommand::Speak { text: "hello".into() }]);
    }

    #[test]
    fn queries_read_the_snapshot_not_the_live_tables() {
        let robot = handle();
        robot.set_locations(vec![EntityInfo::new("L02", "dock")]);
        assert_eq!(robot.get_locations(), vec![EntityInfo::new("L01", "kitchen")]);
        robot.update_resolver();
        assert_eq!(robot.get_locations(), vec![EntityInfo::new("L02", "dock")]);
    }
}
