use super::{delete_record, export_records, import_records, list_records, view_record, Describe};
use crate::console::{Console, ConsoleResult};
use pdm_core::{Collection, Task, TaskDraft, TaskPatch};
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Add task",
    "List tasks",
    "View task",
    "Edit task",
    "Delete task",
    "Mark task as done",
    "Export tasks to CSV",
    "Import tasks from CSV",
    "Back",
];

impl Describe for Task {
    const NOUN: &'static str = "task";

    fn summary(&self) -> String {
        let mark = if self.done { "x" } else { " " };
        format!(
            "[{}] [{mark}] {} ({}, due {})",
            self.id, self.title, self.priority, self.due_date
        )
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("priority", self.priority.to_string()),
            ("due date", self.due_date.clone()),
            ("done", if self.done { "yes" } else { "no" }.to_string()),
        ]
    }
}

pub(super) fn run<R: BufRead, W: Write>(
    tasks: &mut Collection<Task>,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    loop {
        match console.choose("Tasks", ENTRIES)? {
            1 => {
                let draft = TaskDraft {
                    title: console.ask("Title: ")?,
                    description: console.ask("Description: ")?,
                    priority: Some(console.ask("Priority (High/Medium/Low, blank for Low): ")?),
                    due_date: Some(console.ask("Due date (DD-MM-YYYY, blank for today): ")?),
                };
                match tasks.add(draft) {
                    Ok(id) => console.say(format!("Added task {id}."))?,
                    Err(err) => console.say(format!("Could not add task: {err}"))?,
                }
            }
            2 => list_records(tasks, console)?,
            3 => view_record(tasks, console)?,
            4 => {
                let Some(id) = console.ask_id("Enter task id to edit: ")? else {
                    continue;
                };
                if tasks.get(id).is_none() {
                    console.say(format!("No task with id {id}."))?;
                    continue;
                }
                console.say("Leave a field blank to keep its current value.")?;
                let patch = TaskPatch {
                    title: Some(console.ask("New title: ")?),
                    description: Some(console.ask("New description: ")?),
                    priority: Some(console.ask("New priority: ")?),
                    due_date: Some(console.ask("New due date: ")?),
                };
                match tasks.edit(id, patch) {
                    Ok(()) => console.say(format!("Updated task {id}."))?,
                    Err(err) => console.say(format!("Could not edit task: {err}"))?,
                }
            }
            5 => delete_record(tasks, console)?,
            6 => {
                let Some(id) = console.ask_id("Enter task id to mark as done: ")? else {
                    continue;
                };
                match tasks.mark_done(id) {
                    Ok(()) => console.say(format!("Task {id} marked as done."))?,
                    Err(err) => console.say(format!("Could not mark task: {err}"))?,
                }
            }
            7 => export_records(tasks, console)?,
            8 => import_records(tasks, console)?,
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::tests::drive;
    use pdm_core::{StorageConfig, Task, TaskPriority};

    #[test]
    fn add_mark_done_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(
            &storage,
            "2\n1\nFile taxes\nbefore April\nhigh\n15-04-2024\n6\n1\n2\n9\n6\n",
        );

        assert!(text.contains("Added task 1."));
        assert!(text.contains("Task 1 marked as done."));
        assert!(text.contains("[1] [x] File taxes (High, due 15-04-2024)"));
    }

    #[test]
    fn invalid_priority_is_rejected_without_adding() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(&storage, "2\n1\nSomething\n\nurgent\n\n9\n6\n");

        assert!(text.contains("Could not add task"));
        assert!(storage.open::<Task>().unwrap().is_empty());
    }

    #[test]
    fn edit_keeps_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        drive(
            &storage,
            "2\n1\nRead\nnovel\nlow\n01-06-2024\n4\n1\n\n\nMedium\n\n9\n6\n",
        );

        let tasks = storage.open::<Task>().unwrap();
        let task = tasks.get(1).unwrap();
        assert_eq!(task.title, "Read");
        assert_eq!(task.description, "novel");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.due_date, "01-06-2024");
    }
}
