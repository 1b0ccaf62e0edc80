use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use todo_core::{
    Database, Error, Priority, Project, Result, Status, Task, TaskFields, Workspace, parse_due,
};
use tracing::debug;

use super::input::{DraftStep, InputKind, Overlay, TaskDraft};

/// Which list is on screen, and the scope it was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Workspaces,
    Projects {
        workspace: Workspace,
        pending_move: Option<PendingMove>,
    },
    Tasks {
        workspace: Workspace,
        project: Option<Project>,
    },
}

/// A task waiting for its destination list to be picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub task_id: i64,
    pub title: String,
    pub origin: Option<Project>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Open,
    Back,
    Add,
    Edit,
    Delete,
    Color,
    CycleStatus,
    CyclePriority,
    DueDate,
    Move,
    Filter,
    Help,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }

        let action = match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Action::Open,
            KeyCode::Esc | KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => Action::Back,
            KeyCode::Char('a') => Action::Add,
            KeyCode::Char('e') | KeyCode::Char('r') => Action::Edit,
            KeyCode::Char('d') => Action::Delete,
            KeyCode::Char('c') => Action::Color,
            KeyCode::Char('s') => Action::CycleStatus,
            KeyCode::Char('p') => Action::CyclePriority,
            KeyCode::Char('u') => Action::DueDate,
            KeyCode::Char('m') => Action::Move,
            KeyCode::Char('/') => Action::Filter,
            KeyCode::Char('?') => Action::Help,
            _ => return None,
        };
        Some(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An entry on the projects screen: the default list sits above the
/// workspace's projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Default,
    Project(Project),
}

impl ListEntry {
    fn project_id(&self) -> Option<i64> {
        match self {
            ListEntry::Default => None,
            ListEntry::Project(p) => Some(p.id),
        }
    }

    fn into_project(self) -> Option<Project> {
        match self {
            ListEntry::Default => None,
            ListEntry::Project(p) => Some(p),
        }
    }

    fn name(&self) -> &str {
        match self {
            ListEntry::Default => "Default",
            ListEntry::Project(p) => &p.name,
        }
    }
}

pub struct App {
    pub db: Database,
    pub screen: Screen,
    pub overlay: Option<Overlay>,
    pub show_help: bool,
    pub workspaces: Vec<Workspace>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub workspace_state: ListState,
    pub project_state: ListState,
    pub task_state: ListState,
    /// Case-insensitive substring narrowing the projects or tasks list.
    pub filter: Option<String>,
    pub message: Option<Message>,
}

impl App {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            screen: Screen::Workspaces,
            overlay: None,
            show_help: false,
            workspaces: vec![],
            projects: vec![],
            tasks: vec![],
            workspace_state: ListState::default(),
            project_state: ListState::default(),
            task_state: ListState::default(),
            filter: None,
            message: None,
        }
    }

    /// Re-reads the list of the current screen from storage.
    pub async fn refresh(&mut self) -> Result<()> {
        match &self.screen {
            Screen::Workspaces => {
                self.workspaces = self.db.list_workspaces().await?;
                clamp(&mut self.workspace_state, self.workspaces.len());
            }
            Screen::Projects { workspace, .. } => {
                self.projects = self.db.list_projects(workspace.id).await?;
                if let Some(needle) = &self.filter {
                    self.projects.retain(|p| matches_filter(&p.name, needle));
                }
                clamp(&mut self.project_state, self.projects.len() + 1);
            }
            Screen::Tasks { workspace, project } => {
                let project_id = project.as_ref().map(|p| p.id);
                self.tasks = self.db.list_tasks(workspace.id, project_id).await?;
                if let Some(needle) = &self.filter {
                    self.tasks.retain(|t| matches_filter(&t.title, needle));
                }
                clamp(&mut self.task_state, self.tasks.len());
            }
        }
        Ok(())
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if self.show_help {
            self.show_help = false;
            return Flow::Continue;
        }
        if self.overlay.is_some() {
            self.handle_input_key(key).await;
            return Flow::Continue;
        }

        match Action::from_key(key) {
            Some(Action::Quit) => Flow::Quit,
            Some(action) => {
                self.apply(action).await;
                Flow::Continue
            }
            None => Flow::Continue,
        }
    }

    /// Runs one action; failures end up in the status line.
    pub async fn apply(&mut self, action: Action) {
        self.message = None;

        let result = match action {
            Action::Up => {
                self.step_selection(false);
                Ok(())
            }
            Action::Down => {
                self.step_selection(true);
                Ok(())
            }
            Action::Open => self.open().await,
            Action::Back => self.back().await,
            Action::Add => {
                self.start_add();
                Ok(())
            }
            Action::Edit => {
                self.start_edit();
                Ok(())
            }
            Action::Delete => self.delete_selected().await,
            Action::Color => {
                self.start_color();
                Ok(())
            }
            Action::CycleStatus => self.cycle_status().await,
            Action::CyclePriority => self.cycle_priority().await,
            Action::DueDate => {
                self.start_due_date();
                Ok(())
            }
            Action::Move => self.start_move().await,
            Action::Filter => {
                self.start_filter();
                Ok(())
            }
            Action::Help => {
                self.show_help = true;
                Ok(())
            }
            Action::Quit => Ok(()),
        };

        if let Err(err) = result {
            self.report(err);
        }
    }

    pub(super) fn report(&mut self, err: Error) {
        debug!(error = %err, "action failed");
        self.message = Some(Message::Error(err.to_string()));
    }

    fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message::Info(text.into()));
    }

    pub fn selected_workspace(&self) -> Option<&Workspace> {
        self.workspace_state
            .selected()
            .and_then(|i| self.workspaces.get(i))
    }

    pub fn selected_entry(&self) -> Option<ListEntry> {
        match self.project_state.selected()? {
            0 => Some(ListEntry::Default),
            i => self.projects.get(i - 1).cloned().map(ListEntry::Project),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.task_state.selected().and_then(|i| self.tasks.get(i))
    }

    fn is_picking_destination(&self) -> bool {
        matches!(
            self.screen,
            Screen::Projects {
                pending_move: Some(_),
                ..
            }
        )
    }

    fn step_selection(&mut self, forward: bool) {
        let (state, len) = match self.screen {
            Screen::Workspaces => (&mut self.workspace_state, self.workspaces.len()),
            Screen::Projects { .. } => (&mut self.project_state, self.projects.len() + 1),
            Screen::Tasks { .. } => (&mut self.task_state, self.tasks.len()),
        };
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if forward => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    async fn open(&mut self) -> Result<()> {
        match &self.screen {
            Screen::Workspaces => {
                let Some(workspace) = self.selected_workspace().cloned() else {
                    return Ok(());
                };
                self.screen = Screen::Projects {
                    workspace,
                    pending_move: None,
                };
                self.filter = None;
                self.project_state.select(Some(0));
                self.refresh().await
            }
            Screen::Projects {
                workspace,
                pending_move,
            } => {
                let Some(entry) = self.selected_entry() else {
                    return Ok(());
                };
                let workspace = workspace.clone();

                match pending_move.clone() {
                    Some(pending) => {
                        self.db
                            .set_task_project(pending.task_id, entry.project_id())
                            .await?;
                        let destination = entry.name().to_string();
                        self.leave_projects();
                        self.screen = Screen::Tasks {
                            workspace,
                            project: pending.origin,
                        };
                        self.filter = None;
                        self.refresh().await?;
                        self.info(format!("Moved task to {destination}"));
                        Ok(())
                    }
                    None => {
                        self.screen = Screen::Tasks {
                            workspace,
                            project: entry.into_project(),
                        };
                        self.filter = None;
                        self.task_state.select(Some(0));
                        self.refresh().await
                    }
                }
            }
            Screen::Tasks { .. } => Ok(()),
        }
    }

    async fn back(&mut self) -> Result<()> {
        if !matches!(self.screen, Screen::Workspaces) {
            self.filter = None;
        }
        match &self.screen {
            Screen::Workspaces => Ok(()),
            Screen::Projects {
                workspace,
                pending_move: Some(pending),
            } => {
                self.screen = Screen::Tasks {
                    workspace: workspace.clone(),
                    project: pending.origin.clone(),
                };
                self.leave_projects();
                self.refresh().await?;
                self.info("Move canceled");
                Ok(())
            }
            Screen::Projects {
                pending_move: None,
                ..
            } => {
                self.screen = Screen::Workspaces;
                self.leave_projects();
                self.refresh().await
            }
            Screen::Tasks { workspace, project } => {
                let came_from = project.as_ref().map(|p| p.id);
                self.screen = Screen::Projects {
                    workspace: workspace.clone(),
                    pending_move: None,
                };
                self.tasks.clear();
                self.task_state = ListState::default();
                self.refresh().await?;

                let row = came_from
                    .and_then(|id| self.projects.iter().position(|p| p.id == id))
                    .map_or(0, |i| i + 1);
                self.project_state.select(Some(row));
                Ok(())
            }
        }
    }

    fn leave_projects(&mut self) {
        self.projects.clear();
        self.project_state = ListState::default();
    }

    fn start_add(&mut self) {
        if self.is_picking_destination() {
            self.info("Pick a destination list, or go back to cancel the move");
            return;
        }
        let kind = match self.screen {
            Screen::Workspaces => InputKind::NewWorkspace,
            Screen::Projects { .. } => InputKind::NewProject,
            Screen::Tasks { .. } => InputKind::NewTask(TaskDraft::default()),
        };
        self.overlay = Some(Overlay::new(kind));
    }

    fn start_edit(&mut self) {
        if self.is_picking_destination() {
            return;
        }
        self.overlay = match self.screen {
            Screen::Workspaces => self
                .selected_workspace()
                .map(|w| Overlay::prefilled(InputKind::RenameWorkspace(w.id), &w.name)),
            Screen::Projects { .. } => match self.selected_entry() {
                Some(ListEntry::Project(p)) => {
                    Some(Overlay::prefilled(InputKind::RenameProject(p.id), p.name))
                }
                _ => None,
            },
            Screen::Tasks { .. } => self
                .selected_task()
                .map(|t| Overlay::prefilled(InputKind::RenameTask(t.id), &t.title)),
        };
    }

    fn start_color(&mut self) {
        if self.is_picking_destination() {
            return;
        }
        self.overlay = match self.screen {
            Screen::Workspaces => self.selected_workspace().map(|w| {
                Overlay::prefilled(
                    InputKind::WorkspaceColor(w.id),
                    w.color.clone().unwrap_or_default(),
                )
            }),
            Screen::Projects { .. } => match self.selected_entry() {
                Some(ListEntry::Project(p)) => Some(Overlay::prefilled(
                    InputKind::ProjectColor(p.id),
                    p.color.unwrap_or_default(),
                )),
                _ => None,
            },
            Screen::Tasks { .. } => None,
        };
    }

    fn start_due_date(&mut self) {
        if !matches!(self.screen, Screen::Tasks { .. }) {
            return;
        }
        self.overlay = self.selected_task().map(|t| {
            let current = t
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            Overlay::prefilled(InputKind::DueDate(t.id), current)
        });
    }

    fn start_filter(&mut self) {
        if matches!(self.screen, Screen::Workspaces) {
            return;
        }
        let current = self.filter.clone().unwrap_or_default();
        self.overlay = Some(Overlay::prefilled(InputKind::Filter, current));
    }

    async fn delete_selected(&mut self) -> Result<()> {
        match self.screen {
            Screen::Workspaces => {
                let Some(id) = self.selected_workspace().map(|w| w.id) else {
                    return Ok(());
                };
                self.db.delete_workspace(id).await?;
            }
            Screen::Projects { .. } => {
                if self.is_picking_destination() {
                    return Ok(());
                }
                match self.selected_entry() {
                    Some(ListEntry::Project(p)) => self.db.delete_project(p.id).await?,
                    Some(ListEntry::Default) => {
                        self.info("The default list cannot be deleted");
                        return Ok(());
                    }
                    None => return Ok(()),
                }
            }
            Screen::Tasks { .. } => {
                let Some(id) = self.selected_task().map(|t| t.id) else {
                    return Ok(());
                };
                self.db.delete_task(id).await?;
            }
        }
        self.refresh().await
    }

    async fn cycle_status(&mut self) -> Result<()> {
        self.update_selected_task(|fields| fields.status = fields.status.next())
            .await
    }

    async fn cycle_priority(&mut self) -> Result<()> {
        self.update_selected_task(|fields| fields.priority = Priority::cycle(fields.priority))
            .await
    }

    async fn update_selected_task(&mut self, change: impl FnOnce(&mut TaskFields)) -> Result<()> {
        if !matches!(self.screen, Screen::Tasks { .. }) {
            return Ok(());
        }
        let Some(task) = self.selected_task() else {
            return Ok(());
        };
        let id = task.id;
        let mut fields = TaskFields::from(task);
        change(&mut fields);

        self.db.update_task(id, &fields).await?;
        self.refresh().await
    }

    async fn start_move(&mut self) -> Result<()> {
        let Screen::Tasks { workspace, project } = &self.screen else {
            return Ok(());
        };
        let Some(task) = self.selected_task() else {
            return Ok(());
        };

        let pending = PendingMove {
            task_id: task.id,
            title: task.title.clone(),
            origin: project.clone(),
        };
        let title = pending.title.clone();
        self.screen = Screen::Projects {
            workspace: workspace.clone(),
            pending_move: Some(pending),
        };
        self.filter = None;
        self.project_state.select(Some(0));
        self.refresh().await?;
        self.info(format!("Moving \"{title}\": pick a list"));
        Ok(())
    }

    async fn handle_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.submit_input(false).await,
            KeyCode::Tab => self.submit_input(true).await,
            KeyCode::Esc => self.cancel_input(),
            KeyCode::Char('c') if ctrl => self.cancel_input(),
            KeyCode::Backspace => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.buffer.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Drops the overlay along with any partially collected draft.
    pub fn cancel_input(&mut self) {
        self.overlay = None;
    }

    /// Confirms the overlay. `advance` is the next-field action, which only
    /// the new-task draft understands.
    pub async fn submit_input(&mut self, advance: bool) {
        let Some(mut overlay) = self.overlay.take() else {
            return;
        };
        let value = overlay.value().to_string();

        if value.is_empty() && !overlay.allows_empty() {
            self.overlay = Some(overlay);
            return;
        }

        let outcome = match &mut overlay.kind {
            InputKind::NewTask(draft) => self.advance_draft(draft, &value, advance).await,
            _ if advance => Ok(Submitted::Stay),
            kind => {
                let kind = kind.clone();
                self.commit(kind, value).await.map(|()| Submitted::Done)
            }
        };

        match outcome {
            Ok(Submitted::Done) => {}
            Ok(Submitted::Stay) => self.overlay = Some(overlay),
            Ok(Submitted::Next) => {
                self.message = None;
                overlay.buffer.clear();
                self.overlay = Some(overlay);
            }
            Err(err @ Error::Validation { .. }) => {
                self.report(err);
                self.overlay = Some(overlay);
            }
            Err(err) => self.report(err),
        }
    }

    async fn advance_draft(
        &mut self,
        draft: &mut TaskDraft,
        value: &str,
        advance: bool,
    ) -> Result<Submitted> {
        match draft.step {
            DraftStep::Title if !advance => {
                self.create_task(TaskFields::titled(value)).await?;
                Ok(Submitted::Done)
            }
            DraftStep::Title => {
                draft.title = value.to_string();
                draft.step = DraftStep::Due;
                Ok(Submitted::Next)
            }
            DraftStep::Due => {
                draft.due = parse_due(value)?;
                draft.step = DraftStep::Priority;
                Ok(Submitted::Next)
            }
            DraftStep::Priority => {
                draft.priority = Priority::parse_optional(value)?;
                draft.step = DraftStep::Status;
                Ok(Submitted::Next)
            }
            DraftStep::Status => {
                let status = if value.is_empty() {
                    Status::Todo
                } else {
                    value.parse()?
                };
                self.create_task(TaskFields {
                    title: draft.title.clone(),
                    description: String::new(),
                    status,
                    priority: draft.priority,
                    due_date: draft.due,
                })
                .await?;
                Ok(Submitted::Done)
            }
        }
    }

    async fn create_task(&mut self, fields: TaskFields) -> Result<()> {
        let Screen::Tasks { workspace, project } = &self.screen else {
            return Ok(());
        };
        let task = self
            .db
            .create_task(workspace.id, project.as_ref().map(|p| p.id), &fields)
            .await?;
        self.refresh().await?;
        let row = self.tasks.iter().position(|t| t.id == task.id);
        self.task_state.select(row);
        self.info(format!("Added: {}", task.title));
        Ok(())
    }

    async fn commit(&mut self, kind: InputKind, value: String) -> Result<()> {
        match kind {
            InputKind::NewWorkspace => {
                let workspace = self.db.create_workspace(&value).await?;
                self.refresh().await?;
                let row = self.workspaces.iter().position(|w| w.id == workspace.id);
                self.workspace_state.select(row);
                self.info(format!("Added: {value}"));
            }
            InputKind::NewProject => {
                let Screen::Projects { workspace, .. } = &self.screen else {
                    return Ok(());
                };
                let project = self.db.create_project(workspace.id, &value).await?;
                self.refresh().await?;
                let row = self.projects.iter().position(|p| p.id == project.id);
                self.project_state.select(row.map(|i| i + 1));
                self.info(format!("Added: {value}"));
            }
            InputKind::NewTask(_) => {}
            InputKind::RenameWorkspace(id) => {
                self.db.update_workspace(id, &value).await?;
                self.refresh().await?;
            }
            InputKind::RenameProject(id) => {
                self.db.update_project(id, &value).await?;
                self.refresh().await?;
            }
            InputKind::RenameTask(id) => {
                let task = self.db.get_task(id).await?;
                let fields = TaskFields {
                    title: value,
                    ..TaskFields::from(&task)
                };
                self.db.update_task(id, &fields).await?;
                self.refresh().await?;
            }
            InputKind::WorkspaceColor(id) => {
                self.db.set_workspace_color(id, &value).await?;
                self.refresh().await?;
            }
            InputKind::ProjectColor(id) => {
                self.db.set_project_color(id, &value).await?;
                self.refresh().await?;
            }
            InputKind::Filter => {
                self.filter = (!value.is_empty()).then(|| value.to_lowercase());
                match self.screen {
                    Screen::Projects { .. } => self.project_state.select(Some(0)),
                    _ => self.task_state.select(Some(0)),
                }
                self.refresh().await?;
            }
            InputKind::DueDate(id) => {
                let due_date = parse_due(&value)?;
                let task = self.db.get_task(id).await?;
                let fields = TaskFields {
                    due_date,
                    ..TaskFields::from(&task)
                };
                self.db.update_task(id, &fields).await?;
                self.refresh().await?;
            }
        }
        Ok(())
    }
}

enum Submitted {
    Done,
    Next,
    Stay,
}

/// `needle` is already lowercase.
fn matches_filter(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(needle)
}

fn clamp(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    match state.selected() {
        None => state.select(Some(0)),
        Some(i) if i >= len => state.select(Some(len - 1)),
        Some(_) => {}
    }
}
