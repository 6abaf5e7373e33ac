//! Task-specific collection operations.

use super::collection::Collection;
use super::RepoResult;
use crate::model::record::RecordId;
use crate::model::task::Task;
use log::info;

impl Collection<Task> {
    /// Marks a task as done and persists. Already-done tasks stay done.
    pub fn mark_done(&mut self, id: RecordId) -> RepoResult<()> {
        self.get_mut(id)?.done = true;
        self.persist("task_mark_done")?;

        info!("event=task_mark_done module=repo status=ok id={id}");
        Ok(())
    }
}
