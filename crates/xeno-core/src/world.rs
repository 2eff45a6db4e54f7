use crate::AgentId;

/// Read-only world access.
///
/// The kernel does not prescribe which queries a world must expose;
/// subsystems (navigation, battle) define extension traits on top.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
