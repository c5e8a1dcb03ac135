/*
[INPUT]:  Mutating dashboard operations
[OUTPUT]: The queries each mutation makes stale
[POS]:    Dashboard layer - reload-after-mutation contract
[UPDATE]: When adding a mutation or a query
*/

use serde::Serialize;

use super::state::Operation;

/// Server-backed lists the dashboard displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Query {
    Machines,
    /// Tasks of the currently selected machine
    Tasks,
}

impl Query {
    pub fn operation(self) -> Operation {
        match self {
            Query::Machines => Operation::LoadMachines,
            Query::Tasks => Operation::LoadTasks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mutation {
    CreateMachine,
    CreateTask,
    UpdateTaskStatus,
}

impl Mutation {
    /// Queries re-run, in order, after the mutation succeeds
    pub fn invalidates(self) -> &'static [Query] {
        match self {
            Mutation::CreateMachine => &[Query::Machines],
            Mutation::CreateTask | Mutation::UpdateTaskStatus => &[Query::Tasks],
        }
    }

    pub fn operation(self) -> Operation {
        match self {
            Mutation::CreateMachine => Operation::CreateMachine,
            Mutation::CreateTask => Operation::CreateTask,
            Mutation::UpdateTaskStatus => Operation::UpdateTaskStatus,
        }
    }
}
