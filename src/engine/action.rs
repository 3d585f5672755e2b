use std::fmt;

/// A remote operation the user can trigger from the panel.
///
/// Each variant has a stable key (used in logs and the command line)
/// distinct from its display label. Controls carry the variant itself, so
/// there is no such thing as an unknown action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Scan,
    Sync,
    DryRun,
}

impl Action {
    /// All actions in control-row order.
    pub const ALL: [Action; 3] = [Action::Scan, Action::Sync, Action::DryRun];

    pub fn key(self) -> &'static str {
        match self {
            Action::Scan => "scan",
            Action::Sync => "sync",
            Action::DryRun => "dry-run",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Scan => "Scan",
            Action::Sync => "Sync",
            Action::DryRun => "Dry run",
        }
    }

    /// Whether this action sets `dry_run` on the sync payload.
    pub fn is_dry_run(self) -> bool {
        matches!(self, Action::DryRun)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
