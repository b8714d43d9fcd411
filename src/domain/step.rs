use std::fmt;

/// One stage of the release sequence, in execution order.
///
/// A run walks these strictly in order and stops at the first one that fails;
/// nothing already done is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CheckUntracked,
    CheckUncommitted,
    RewriteFiles,
    Stage,
    Commit,
    Push,
    Tag,
    PushTags,
}

impl Step {
    /// Every step, in the order a release runs them
    pub const ALL: [Step; 8] = [
        Step::CheckUntracked,
        Step::CheckUncommitted,
        Step::RewriteFiles,
        Step::Stage,
        Step::Commit,
        Step::Push,
        Step::Tag,
        Step::PushTags,
    ];

    /// Stable name used in diagnostics and logs
    pub fn name(&self) -> &'static str {
        match self {
            Step::CheckUntracked => "check-untracked",
            Step::CheckUncommitted => "check-uncommitted",
            Step::RewriteFiles => "rewrite-files",
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Push => "push",
            Step::Tag => "tag",
            Step::PushTags => "push-tags",
        }
    }

    /// Whether the step changes the repository or its remote
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Step::CheckUntracked | Step::CheckUncommitted)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
