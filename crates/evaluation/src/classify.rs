//! The classify operation the evaluator depends on.

use async_trait::async_trait;
use nlc_sdk::{ClassificationResult, ClassifierService, Client};

use crate::error::ClassificationError;

/// Something that can classify one utterance with a given classifier.
#[async_trait]
pub trait Classify: Send + Sync {
    /// Classify `text` with the classifier identified by `classifier_id`
    async fn classify(
        &self,
        classifier_id: &str,
        text: &str,
    ) -> Result<ClassificationResult, ClassificationError>;
}

#[async_trait]
impl Classify for ClassifierService {
    async fn classify(
        &self,
        classifier_id: &str,
        text: &str,
    ) -> Result<ClassificationResult, ClassificationError> {
        ClassifierService::classify(self, classifier_id, text)
            .await
            .map_err(ClassificationError::from)
    }
}

#[async_trait]
impl Classify for Client {
    async fn classify(
        &self,
        classifier_id: &str,
        text: &str,
    ) -> Result<ClassificationResult, ClassificationError> {
        self.classifiers()
            .classify(classifier_id, text)
            .await
            .map_err(ClassificationError::from)
    }
}
