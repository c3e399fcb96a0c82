//! In-process quiz store.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Contents are lost on restart.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{QuizRepository, QuizRepositoryError};
use crate::domain::{Quiz, QuizId};

#[derive(Debug)]
struct Store {
    quizzes: BTreeMap<QuizId, Quiz>,
    next_id: i32,
}

impl Store {
    fn allocate(&mut self) -> Result<QuizId, QuizRepositoryError> {
        let id = QuizId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| QuizRepositoryError::query("quiz id sequence exhausted"))?;
        Ok(id)
    }
}

/// [`QuizRepository`] kept in a `BTreeMap` so listing order follows ids.
///
/// Ids start at 1 and are never reused, even after deletion.
#[derive(Debug)]
pub struct InMemoryQuizRepository {
    store: RwLock<Store>,
}

impl Default for InMemoryQuizRepository {
    fn default() -> Self {
        Self {
            store: RwLock::new(Store {
                quizzes: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryQuizRepository {
    /// Empty store; the first id assigned is 1.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> QuizRepositoryError {
    QuizRepositoryError::query("quiz store lock poisoned")
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_all(&self) -> Result<Vec<Quiz>, QuizRepositoryError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store.quizzes.values().cloned().collect())
    }

    async fn find_by_id(&self, id: QuizId) -> Result<Option<Quiz>, QuizRepositoryError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store.quizzes.get(&id).cloned())
    }

    async fn save(&self, quiz: &Quiz) -> Result<Quiz, QuizRepositoryError> {
        let mut store = self.store.write().map_err(poisoned)?;
        let id = match quiz.id {
            Some(id) if store.quizzes.contains_key(&id) => id,
            _ => store.allocate()?,
        };
        let stored = quiz.clone().with_id(id);
        store.quizzes.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: QuizId) -> Result<(), QuizRepositoryError> {
        let mut store = self.store.write().map_err(poisoned)?;
        store.quizzes.remove(&id);
        Ok(())
    }
}
