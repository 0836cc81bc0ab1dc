//! Model-related AnkiConnect actions.
//!
//! This module provides operations for managing note types (models) in Anki.
//!
//! # Example
//!
//! ```no_run
//! use ankijp::{AnkiClient, CreateModelParams};
//!
//! # async fn example() -> ankijp::Result<()> {
//! let client = AnkiClient::new();
//!
//! if !client.models().exists("Japanese Verb").await? {
//!     let params = CreateModelParams::new("Japanese Verb")
//!         .field("核心單字")
//!         .field("核心意義")
//!         .template("Card 1", "{{核心單字}}", "{{FrontSide}}<hr>{{核心意義}}");
//!     client.models().create(params).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::CreateModelParams;

/// Provides access to model-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::models()`].
#[derive(Debug)]
pub struct ModelActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelNameParams<'a> {
    model_name: &'a str,
}

#[derive(Serialize)]
struct UpdateTemplatesParams<'a> {
    model: UpdateTemplatesModel<'a>,
}

#[derive(Serialize)]
struct UpdateTemplatesModel<'a> {
    name: &'a str,
    templates: HashMap<&'a str, TemplateContent<'a>>,
}

#[derive(Serialize)]
struct TemplateContent<'a> {
    #[serde(rename = "Front")]
    front: &'a str,
    #[serde(rename = "Back")]
    back: &'a str,
}

impl<'a> ModelActions<'a> {
    /// Get all model names.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.invoke_without_params("modelNames").await
    }

    /// Get the ordered field names of a model.
    pub async fn field_names(&self, model_name: &str) -> Result<Vec<String>> {
        self.client
            .invoke("modelFieldNames", ModelNameParams { model_name })
            .await
    }

    /// Check whether a model exists (exact, case-sensitive match).
    pub async fn exists(&self, model_name: &str) -> Result<bool> {
        let names = self.names().await?;
        Ok(names.iter().any(|name| name == model_name))
    }

    /// Create a new model.
    ///
    /// AnkiConnect rejects a name that is already taken, so check
    /// [`exists`](Self::exists) first.
    pub async fn create(&self, params: CreateModelParams) -> Result<()> {
        self.client.invoke_void("createModel", params).await
    }

    /// Replace the front/back HTML of existing card templates.
    ///
    /// The map goes from template name to `(front, back)`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankijp::AnkiClient;
    /// # use std::collections::HashMap;
    /// # async fn example() -> ankijp::Result<()> {
    /// let client = AnkiClient::new();
    ///
    /// let mut templates = HashMap::new();
    /// templates.insert("Card 1", ("{{核心單字}}", "{{FrontSide}}<hr>{{核心意義}}"));
    ///
    /// client.models().update_templates("Japanese Verb", templates).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_templates(
        &self,
        model_name: &str,
        templates: HashMap<&str, (&str, &str)>,
    ) -> Result<()> {
        let template_map: HashMap<&str, TemplateContent> = templates
            .into_iter()
            .map(|(name, (front, back))| (name, TemplateContent { front, back }))
            .collect();

        self.client
            .invoke_void(
                "updateModelTemplates",
                UpdateTemplatesParams {
                    model: UpdateTemplatesModel {
                        name: model_name,
                        templates: template_map,
                    },
                },
            )
            .await
    }
}
