use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::core::models::question::{Insert as QuestionInsert, Patch as QuestionPatch, Query as QuestionQuery, Question, QuestionSummary};
use crate::core::ports::repository::QuestionStore;
use crate::error::Error;

#[derive(Debug, Default)]
struct Tables {
    questions_by_id: HashMap<Uuid, Question>,
    // creation order per author
    ids_by_author: HashMap<String, Vec<Uuid>>,
}

impl Tables {
    fn owned(&self, uid: &str, id: Uuid) -> Option<&Question> {
        self.questions_by_id.get(&id).filter(|q| q.author_id == uid)
    }

    fn owned_mut(&mut self, uid: &str, id: Uuid) -> Option<&mut Question> {
        self.questions_by_id.get_mut(&id).filter(|q| q.author_id == uid)
    }
}

/// Volatile question store. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, Error> {
        self.tables.read().map_err(|_| Error::ServerError("question store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, Error> {
        self.tables.write().map_err(|_| Error::ServerError("question store lock poisoned".into()))
    }
}

impl QuestionStore for MemStore {
    fn create(&self, uid: &str, question: QuestionInsert) -> Result<Question, Error> {
        let mut tables = self.write()?;
        let mut id = Uuid::new_v4();
        while tables.questions_by_id.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let question = Question::new(id, uid, Utc::now(), question);
        tables.questions_by_id.insert(id, question.clone());
        tables.ids_by_author.entry(uid.to_owned()).or_default().push(id);
        Ok(question)
    }

    fn list(&self, uid: &str, query: &QuestionQuery) -> Result<Vec<QuestionSummary>, Error> {
        let tables = self.read()?;
        let ids = match tables.ids_by_author.get(uid) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| tables.questions_by_id.get(id))
            .filter(|q| query.matches(q))
            .map(QuestionSummary::from)
            .collect())
    }

    fn get(&self, uid: &str, id: Uuid) -> Result<Option<Question>, Error> {
        Ok(self.read()?.owned(uid, id).cloned())
    }

    fn update(&self, uid: &str, id: Uuid, patch: QuestionPatch) -> Result<Option<Question>, Error> {
        let mut tables = self.write()?;
        let question = match tables.owned_mut(uid, id) {
            Some(question) => question,
            None => return Ok(None),
        };
        question.apply(patch).map_err(Error::ValidationError)?;
        Ok(Some(question.clone()))
    }

    fn delete(&self, uid: &str, id: Uuid) -> Result<bool, Error> {
        let mut tables = self.write()?;
        if tables.owned(uid, id).is_none() {
            return Ok(false);
        }
        tables.questions_by_id.remove(&id);
        if let Some(ids) = tables.ids_by_author.get_mut(uid) {
            ids.retain(|i| *i != id);
        }
        Ok(true)
    }
}
