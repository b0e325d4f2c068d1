//! Statement node kinds.

use crate::{Direction, EntityKind, ExprId, Name, StmtId, StmtRange};

/// Movement command forwarded to the bound entity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ActionKind {
    StartRun(Direction),
    StopRun(Direction),
    StartJump,
    StopJump,
    StartDuck,
    StopDuck,
}

impl ActionKind {
    /// Source-level keyword of the action.
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::StartRun(_) => "start_run",
            ActionKind::StopRun(_) => "stop_run",
            ActionKind::StartJump => "start_jump",
            ActionKind::StopJump => "stop_jump",
            ActionKind::StartDuck => "start_duck",
            ActionKind::StopDuck => "stop_duck",
        }
    }
}

/// Which world objects a `foreach` enumerates.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ForeachKind {
    Entity(EntityKind),
    Terrain,
    Any,
}

impl ForeachKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ForeachKind::Entity(kind) => kind.as_str(),
            ForeachKind::Terrain => "terrain",
            ForeachKind::Any => "any",
        }
    }
}

/// Sort direction of a `foreach ... sort` clause.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Statement node.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StmtKind {
    Skip,
    Assign {
        target: Name,
        value: ExprId,
    },
    Print(ExprId),
    Action(ActionKind),
    Sequence(StmtRange),
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    Foreach {
        var: Name,
        kind: ForeachKind,
        filter: Option<ExprId>,
        sort: Option<(ExprId, SortOrder)>,
        body: StmtId,
    },
    Break,
    Wait(ExprId),
}

impl StmtKind {
    /// Whether this statement is a loop that absorbs `break`.
    pub const fn is_loop(&self) -> bool {
        matches!(self, StmtKind::While { .. } | StmtKind::Foreach { .. })
    }
}
