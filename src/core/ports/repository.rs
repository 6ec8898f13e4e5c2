use crate::core::models::question::{Insert as QuestionInsert, Patch as QuestionPatch, Query as QuestionQuery, Question, QuestionSummary};
use crate::error::Error;
use uuid::Uuid;

/// Author-scoped question storage. Every method acts only on records owned by
/// `uid`; a record owned by someone else is treated exactly like a missing one.
/// `Err` is reserved for failures of the store itself.
pub trait QuestionStore {
    /// Assigns a fresh id and the current time, and returns the stored record.
    fn create(&self, uid: &str, question: QuestionInsert) -> Result<Question, Error>;

    /// Summaries of the author's questions matching every set filter, oldest first.
    fn list(&self, uid: &str, query: &QuestionQuery) -> Result<Vec<QuestionSummary>, Error>;

    fn get(&self, uid: &str, id: Uuid) -> Result<Option<Question>, Error>;

    /// Merges the patch over the stored record. Returns `None` when there is no
    /// such record for this author, and a validation error when the patch's
    /// type-dependent fields do not fit the stored question type.
    fn update(&self, uid: &str, id: Uuid, patch: QuestionPatch) -> Result<Option<Question>, Error>;

    /// Returns whether a record was removed.
    fn delete(&self, uid: &str, id: Uuid) -> Result<bool, Error>;
}
