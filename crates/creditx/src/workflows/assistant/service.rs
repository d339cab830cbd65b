use std::sync::Arc;

use tracing::{info, warn};

use super::client::{CompletionClient, CompletionRequest};
use super::documents::{DocumentReviewRequest, DocumentValidation};
use super::error::AssistantError;
use super::extract::parse_model_json;
use super::prompts;
use super::valuation::PropertyEstimate;
use crate::workflows::mortgage::PropertyDetails;

/// Thin proxy turning wizard data into prompts and model replies into typed results.
pub struct AssistantService<C> {
    client: Arc<C>,
}

impl<C> AssistantService<C>
where
    C: CompletionClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn estimate_property(
        &self,
        property: &PropertyDetails,
    ) -> Result<PropertyEstimate, AssistantError> {
        let request = CompletionRequest {
            system: prompts::VALUATION_SYSTEM.to_string(),
            prompt: prompts::valuation_prompt(property),
            image_url: None,
        };

        let reply = self.client.complete(&request).await?;
        let estimate: PropertyEstimate = parse_model_json(&reply).inspect_err(|err| {
            warn!(error = %err, "property estimate reply unusable");
        })?;
        if estimate.estimated_value.is_zero() {
            return Err(AssistantError::MalformedOutput {
                excerpt: "estimatedValue missing or zero".to_string(),
            });
        }

        let estimate = estimate.normalized();
        info!(
            city = %property.city,
            estimated_value = %estimate.estimated_value,
            "property value estimated"
        );
        Ok(estimate)
    }

    pub async fn review_document(
        &self,
        review: &DocumentReviewRequest,
    ) -> Result<DocumentValidation, AssistantError> {
        review.ensure_image()?;

        let request = CompletionRequest {
            system: prompts::DOCUMENT_SYSTEM.to_string(),
            prompt: prompts::document_prompt(review.category, review.applicant_name.as_deref()),
            image_url: Some(review.image_url.clone()),
        };

        let reply = self.client.complete(&request).await?;
        let validation: DocumentValidation = parse_model_json(&reply).inspect_err(|err| {
            warn!(error = %err, "document review reply unusable");
        })?;

        info!(
            category = review.category.label(),
            is_valid = validation.is_valid,
            issues = validation.issues.len(),
            "document reviewed"
        );
        Ok(validation)
    }
}
