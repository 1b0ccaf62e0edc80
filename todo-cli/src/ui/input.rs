//! Single-line input overlay and the multi-step new-task draft.

use chrono::NaiveDate;
use todo_core::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    Title,
    Due,
    Priority,
    Status,
}

impl DraftStep {
    pub fn number(self) -> usize {
        match self {
            DraftStep::Title => 1,
            DraftStep::Due => 2,
            DraftStep::Priority => 3,
            DraftStep::Status => 4,
        }
    }
}

/// Fields collected so far while creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub step: DraftStep,
    pub title: String,
    pub due: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            step: DraftStep::Title,
            title: String::new(),
            due: None,
            priority: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    NewWorkspace,
    NewProject,
    NewTask(TaskDraft),
    RenameWorkspace(i64),
    RenameProject(i64),
    RenameTask(i64),
    WorkspaceColor(i64),
    ProjectColor(i64),
    DueDate(i64),
    Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub kind: InputKind,
    pub buffer: String,
}

impl Overlay {
    pub fn new(kind: InputKind) -> Self {
        Self::prefilled(kind, String::new())
    }

    pub fn prefilled(kind: InputKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            buffer: text.into(),
        }
    }

    pub fn value(&self) -> &str {
        self.buffer.trim()
    }

    /// Whether confirming an empty field means something. Clearing overlays
    /// and the optional draft steps accept it; names and titles do not.
    pub fn allows_empty(&self) -> bool {
        match &self.kind {
            InputKind::WorkspaceColor(_)
            | InputKind::ProjectColor(_)
            | InputKind::DueDate(_)
            | InputKind::Filter => true,
            InputKind::NewTask(draft) => draft.step != DraftStep::Title,
            _ => false,
        }
    }

    pub fn title(&self) -> String {
        match &self.kind {
            InputKind::NewWorkspace => "new workspace".into(),
            InputKind::NewProject => "new list".into(),
            InputKind::NewTask(draft) => {
                let field = match draft.step {
                    DraftStep::Title => "title",
                    DraftStep::Due => "due date",
                    DraftStep::Priority => "priority",
                    DraftStep::Status => "status",
                };
                format!("new task ({}/4): {field}", draft.step.number())
            }
            InputKind::RenameWorkspace(_) | InputKind::RenameProject(_) => "rename".into(),
            InputKind::RenameTask(_) => "edit title".into(),
            InputKind::WorkspaceColor(_) | InputKind::ProjectColor(_) => "color".into(),
            InputKind::DueDate(_) => "due date".into(),
            InputKind::Filter => "filter".into(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match &self.kind {
            InputKind::NewTask(draft) => match draft.step {
                DraftStep::Title => "Title...",
                DraftStep::Due => "Due date (YYYY-MM-DD, optional)",
                DraftStep::Priority => "Priority: low / medium / high (optional)",
                DraftStep::Status => "Status: todo / in_progress / done (optional)",
            },
            InputKind::WorkspaceColor(_) | InputKind::ProjectColor(_) => {
                "Color name or #rrggbb (empty clears)"
            }
            InputKind::DueDate(_) => "YYYY-MM-DD (empty clears)",
            InputKind::Filter => "Part of a name or title (empty clears)",
            _ => "Name...",
        }
    }

    pub fn hint(&self) -> &'static str {
        match &self.kind {
            InputKind::NewTask(draft) if draft.step == DraftStep::Title => {
                "enter: create | tab: more fields | esc: cancel"
            }
            InputKind::NewTask(draft) if draft.step == DraftStep::Status => {
                "enter/tab: create | esc: cancel"
            }
            InputKind::NewTask(_) => "enter/tab: next field | esc: cancel",
            _ => "enter: save | esc: cancel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_only_allowed_where_it_clears_or_is_optional() {
        assert!(!Overlay::new(InputKind::NewWorkspace).allows_empty());
        assert!(!Overlay::new(InputKind::RenameTask(1)).allows_empty());
        assert!(!Overlay::new(InputKind::NewTask(TaskDraft::default())).allows_empty());
        assert!(Overlay::new(InputKind::WorkspaceColor(1)).allows_empty());
        assert!(Overlay::new(InputKind::DueDate(1)).allows_empty());
        assert!(Overlay::new(InputKind::Filter).allows_empty());

        let draft = TaskDraft {
            step: DraftStep::Priority,
            ..TaskDraft::default()
        };
        assert!(Overlay::new(InputKind::NewTask(draft)).allows_empty());
    }

    #[test]
    fn draft_title_shows_progress() {
        let draft = TaskDraft {
            step: DraftStep::Due,
            ..TaskDraft::default()
        };
        assert_eq!(
            Overlay::new(InputKind::NewTask(draft)).title(),
            "new task (2/4): due date"
        );
    }
}
