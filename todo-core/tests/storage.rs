use chrono::NaiveDate;
use todo_core::{Database, Error, Priority, Status, TaskFields};

async fn db() -> Database {
    Database::open_in_memory().await.unwrap()
}

#[tokio::test]
async fn workspace_lookup_by_name() {
    let db = db().await;
    let created = db.create_workspace("Personal").await.unwrap();

    let found = db.get_workspace_by_name("Personal").await.unwrap();
    assert_eq!(found.name, "Personal");
    assert_eq!(found.id, created.id);
    assert!(found.id > 0);
    assert_eq!(found.color, None);

    let err = db.get_workspace_by_name("Nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn workspaces_are_listed_by_name() {
    let db = db().await;
    for name in ["Work", "Daily", "Personal"] {
        db.create_workspace(name).await.unwrap();
    }

    let names: Vec<_> = db
        .list_workspaces()
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(names, ["Daily", "Personal", "Work"]);
}

#[tokio::test]
async fn deleting_workspace_cascades() {
    let db = db().await;
    let work = db.create_workspace("Work").await.unwrap();
    let home = db.create_workspace("Home").await.unwrap();
    let launch = db.create_project(work.id, "Launch").await.unwrap();

    let in_project = db
        .create_task(work.id, Some(launch.id), &TaskFields::titled("a"))
        .await
        .unwrap();
    let in_default = db
        .create_task(work.id, None, &TaskFields::titled("b"))
        .await
        .unwrap();
    let elsewhere = db
        .create_task(home.id, None, &TaskFields::titled("c"))
        .await
        .unwrap();

    db.delete_workspace(work.id).await.unwrap();

    for id in [in_project.id, in_default.id] {
        assert!(matches!(
            db.get_task(id).await,
            Err(Error::NotFound { entity: "task", .. })
        ));
    }
    assert!(db.get_project(launch.id).await.unwrap_err().is_not_found());
    assert_eq!(db.get_task(elsewhere.id).await.unwrap().title, "c");
}

#[tokio::test]
async fn deleting_project_moves_tasks_to_default_list() {
    let db = db().await;
    let work = db.create_workspace("Work").await.unwrap();
    let launch = db.create_project(work.id, "Launch").await.unwrap();
    let task = db
        .create_task(work.id, Some(launch.id), &TaskFields::titled("Ship it"))
        .await
        .unwrap();

    db.delete_project(launch.id).await.unwrap();

    let task = db.get_task(task.id).await.unwrap();
    assert_eq!(task.project_id, None);
    assert_eq!(task.workspace_id, work.id);
    assert_eq!(db.list_tasks(work.id, None).await.unwrap().len(), 1);
    assert!(db.list_projects(work.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn new_tasks_default_to_todo_and_updates_refresh_timestamp() {
    let db = db().await;
    let ws = db.create_workspace("Work").await.unwrap();
    let task = db
        .create_task(ws.id, None, &TaskFields::titled("Write"))
        .await
        .unwrap();
    assert_eq!(task.status, Status::Todo);
    assert_eq!(task.priority, None);
    assert_eq!(task.due_date, None);

    let mut fields = TaskFields::from(&task);
    fields.status = Status::Done;
    let updated = db.update_task(task.id, &fields).await.unwrap();

    assert_eq!(updated.status, Status::Done);
    assert!(updated.updated_at >= task.updated_at);
    assert_eq!(updated.created_at, task.created_at);
}

#[tokio::test]
async fn list_tasks_filters_by_exact_list() {
    let db = db().await;
    let work = db.create_workspace("Work").await.unwrap();
    let home = db.create_workspace("Home").await.unwrap();
    let launch = db.create_project(work.id, "Launch").await.unwrap();

    db.create_task(work.id, None, &TaskFields::titled("default"))
        .await
        .unwrap();
    db.create_task(work.id, Some(launch.id), &TaskFields::titled("launch"))
        .await
        .unwrap();
    db.create_task(home.id, None, &TaskFields::titled("home"))
        .await
        .unwrap();

    let default: Vec<_> = db.list_tasks(work.id, None).await.unwrap();
    assert_eq!(default.len(), 1);
    assert_eq!(default[0].title, "default");

    let in_launch = db.list_tasks(work.id, Some(launch.id)).await.unwrap();
    assert_eq!(in_launch.len(), 1);
    assert_eq!(in_launch[0].title, "launch");

    let all = db.list_all_tasks(work.id).await.unwrap();
    let titles: Vec<_> = all.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["default", "launch"]);
}

#[tokio::test]
async fn tasks_keep_creation_order() {
    let db = db().await;
    let ws = db.create_workspace("Work").await.unwrap();
    for title in ["first", "second", "third"] {
        db.create_task(ws.id, None, &TaskFields::titled(title))
            .await
            .unwrap();
    }

    let titles: Vec<_> = db
        .list_tasks(ws.id, None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn due_date_and_priority_round_trip() {
    let db = db().await;
    let ws = db.create_workspace("Work").await.unwrap();
    let fields = TaskFields {
        title: "Taxes".into(),
        priority: Some(Priority::High),
        due_date: todo_core::parse_due("2024-03-15").unwrap(),
        ..TaskFields::default()
    };

    let created = db.create_task(ws.id, None, &fields).await.unwrap();
    let task = db.get_task(created.id).await.unwrap();

    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    assert_eq!(task.priority, Some(Priority::High));
}

#[tokio::test]
async fn work_launch_scenario() {
    let db = db().await;
    let work = db.create_workspace("Work").await.unwrap();
    let launch = db.create_project(work.id, "Launch").await.unwrap();
    db.create_task(work.id, Some(launch.id), &TaskFields::titled("Draft spec"))
        .await
        .unwrap();

    let ws = db.get_workspace_by_name("Work").await.unwrap();
    let project = db.get_project_by_name(ws.id, "Launch").await.unwrap();
    let tasks = db.list_tasks(ws.id, Some(project.id)).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Draft spec");
    assert_eq!(tasks[0].status, Status::Todo);
    assert_eq!(tasks[0].priority, None);
    assert_eq!(tasks[0].due_date, None);
}

#[tokio::test]
async fn color_can_be_set_and_cleared() {
    let db = db().await;
    let ws = db.create_workspace("Work").await.unwrap();
    let project = db.create_project(ws.id, "Launch").await.unwrap();

    let ws = db.set_workspace_color(ws.id, "blue").await.unwrap();
    assert_eq!(ws.color.as_deref(), Some("#0000ff"));
    let ws = db.set_workspace_color(ws.id, "").await.unwrap();
    assert_eq!(ws.color, None);

    let project = db.set_project_color(project.id, "#ABCDEF").await.unwrap();
    assert_eq!(project.color.as_deref(), Some("#abcdef"));
}

#[tokio::test]
async fn renames_and_moves() {
    let db = db().await;
    let ws = db.create_workspace("Wrok").await.unwrap();
    let ws = db.update_workspace(ws.id, "Work").await.unwrap();
    assert_eq!(ws.name, "Work");

    let a = db.create_project(ws.id, "A").await.unwrap();
    let b = db.update_project(a.id, "B").await.unwrap();
    assert_eq!(b.name, "B");

    let task = db
        .create_task(ws.id, None, &TaskFields::titled("t"))
        .await
        .unwrap();
    let moved = db.set_task_project(task.id, Some(b.id)).await.unwrap();
    assert_eq!(moved.project_id, Some(b.id));
    let back = db.set_task_project(task.id, None).await.unwrap();
    assert_eq!(back.project_id, None);
}

#[tokio::test]
async fn task_cannot_join_project_of_another_workspace() {
    let db = db().await;
    let work = db.create_workspace("Work").await.unwrap();
    let home = db.create_workspace("Home").await.unwrap();
    let garden = db.create_project(home.id, "Garden").await.unwrap();

    let err = db
        .create_task(work.id, Some(garden.id), &TaskFields::titled("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "project", .. }));
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let db = db().await;
    assert!(db.get_workspace(42).await.unwrap_err().is_not_found());
    assert!(db.delete_task(42).await.unwrap_err().is_not_found());
    assert!(db.delete_project(42).await.unwrap_err().is_not_found());
    assert!(
        db.update_task(42, &TaskFields::titled("x"))
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    let db = Database::open(&path).await.unwrap();
    let ws = db.create_workspace("Work").await.unwrap();
    db.set_workspace_color(ws.id, "green").await.unwrap();
    db.close().await;

    let db = Database::open(&path).await.unwrap();
    let ws = db.get_workspace_by_name("Work").await.unwrap();
    assert_eq!(ws.color.as_deref(), Some("#00ff00"));
}
