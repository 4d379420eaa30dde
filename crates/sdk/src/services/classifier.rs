//! Classifier service
//!
//! Service for creating, inspecting, querying and deleting classifiers.

use crate::client::Client;
use crate::error::{SdkError, SdkResult};
use crate::models::{
    ClassificationResult, Classifier, ClassifierList, ClassifierStatus, ClassifyRequest,
    CreateClassifierRequest,
};
use reqwest::multipart::{Form, Part};

const API_VERSION: &str = "v1";
const CLASSIFIERS: &str = "classifiers";

/// Service for classifier operations
#[derive(Clone)]
pub struct ClassifierService {
    client: Client,
}

impl ClassifierService {
    /// Create a new classifier service
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Upload training data and start training a new classifier
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nlc_sdk::{Client, CreateClassifierRequest, TrainingExample};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::from_env()?;
    ///
    /// let request = CreateClassifierRequest::new(vec![TrainingExample {
    ///     text: "How hot is it today?".to_string(),
    ///     classes: vec!["temperature".to_string()],
    /// }])
    /// .with_name("weather");
    ///
    /// let classifier = client.classifiers().create(&request).await?;
    /// println!("Training {}", classifier.classifier_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, request: &CreateClassifierRequest) -> SdkResult<Classifier> {
        if request.training_data.is_empty() {
            return Err(SdkError::ConfigError {
                message: "Training data cannot be empty".to_string(),
            });
        }

        let metadata = serde_json::to_string(&request.metadata())?;
        let training_csv = request.to_training_csv()?;

        let training_part = Part::text(training_csv)
            .file_name("training_data.csv")
            .mime_str("text/csv")?;
        let metadata_part = Part::text(metadata).mime_str("application/json")?;

        let form = Form::new()
            .part("training_metadata", metadata_part)
            .part("training_data", training_part);

        self.client
            .post_multipart(&[API_VERSION, CLASSIFIERS], form)
            .await
    }

    /// Get the training status of a classifier
    pub async fn status(&self, classifier_id: &str) -> SdkResult<ClassifierStatus> {
        self.client
            .get(&[API_VERSION, CLASSIFIERS, classifier_id])
            .await
            .map_err(|e| e.for_classifier(classifier_id))
    }

    /// Classify a phrase
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nlc_sdk::Client;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::from_env()?;
    ///
    /// let result = client.classifiers().classify("10D41B-nlc-1", "Will it rain?").await?;
    /// for class in &result.classes {
    ///     println!("{} {:.4}", class.class_name, class.confidence);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn classify(
        &self,
        classifier_id: &str,
        text: &str,
    ) -> SdkResult<ClassificationResult> {
        self.client
            .post(
                &[API_VERSION, CLASSIFIERS, classifier_id, "classify"],
                &ClassifyRequest { text },
            )
            .await
            .map_err(|e| e.for_classifier(classifier_id))
    }

    /// List all classifiers
    pub async fn list(&self) -> SdkResult<ClassifierList> {
        self.client.get(&[API_VERSION, CLASSIFIERS]).await
    }

    /// Delete a classifier
    ///
    /// The service answers with an empty object on success; anything else it
    /// sends back is returned unchanged.
    pub async fn remove(&self, classifier_id: &str) -> SdkResult<serde_json::Value> {
        self.client
            .delete(&[API_VERSION, CLASSIFIERS, classifier_id])
            .await
            .map_err(|e| e.for_classifier(classifier_id))
    }
}
