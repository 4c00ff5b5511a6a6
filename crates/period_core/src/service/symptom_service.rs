//! Symptom use-case service.

use crate::model::symptom::{NewSymptom, SymptomId, SymptomRecord};
use crate::repo::symptom_repo::SymptomRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for symptom logging.
pub struct SymptomService<R: SymptomRepository> {
    repo: R,
}

impl<R: SymptomRepository> SymptomService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Logs one symptom entry exactly as entered.
    pub fn log_symptoms(&self, symptom: &NewSymptom) -> RepoResult<SymptomId> {
        self.repo.add_symptom(symptom)
    }

    pub fn list_symptoms(&self) -> RepoResult<Vec<SymptomRecord>> {
        self.repo.list_symptoms()
    }
}
