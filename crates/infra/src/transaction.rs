//! Scoped unit of work across several store connections.

use crate::store::{StoreError, StoreResult, Transactional};

/// All-or-nothing unit across one or more [`Transactional`] stores.
///
/// Transactions are begun in the given order and committed or rolled back in
/// reverse order. Dropping an unfinished unit rolls every participant back,
/// so early returns and `?` never leave a transaction open.
pub struct UnitOfWork<'a> {
    participants: Vec<&'a dyn Transactional>,
    finished: bool,
}

impl<'a> UnitOfWork<'a> {
    /// Begin a transaction on every participant.
    ///
    /// If one of them fails to begin, the ones already begun are rolled back.
    pub fn begin(participants: Vec<&'a dyn Transactional>) -> StoreResult<Self> {
        let mut begun = Vec::with_capacity(participants.len());
        for participant in participants {
            if let Err(e) = participant.begin() {
                let unit = UnitOfWork {
                    participants: begun,
                    finished: false,
                };
                drop(unit);
                return Err(e);
            }
            begun.push(participant);
        }

        Ok(Self {
            participants: begun,
            finished: false,
        })
    }

    /// Commit all participants (last begun first).
    ///
    /// On failure the participants that were not committed yet are rolled back.
    pub fn commit(mut self) -> StoreResult<()> {
        self.finished = true;
        let mut pending = self.participants.iter().rev();

        while let Some(participant) = pending.next() {
            if let Err(e) = participant.commit() {
                for rest in pending.by_ref() {
                    if let Err(rb) = rest.rollback() {
                        tracing::warn!(error = %rb, "rollback after failed commit failed");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Roll back all participants; reports the first failure after trying all.
    pub fn rollback(mut self) -> StoreResult<()> {
        self.finished = true;
        rollback_all(&self.participants)
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = rollback_all(&self.participants) {
            tracing::warn!(error = %e, "implicit rollback failed");
        }
    }
}

fn rollback_all(participants: &[&dyn Transactional]) -> StoreResult<()> {
    let mut first: Option<StoreError> = None;
    for participant in participants.iter().rev() {
        if let Err(e) = participant.rollback() {
            first.get_or_insert(e);
        }
    }
    match first {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
