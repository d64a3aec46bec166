//! Pipeline templates and token substitution
//!
//! Build and release definitions are created from JSON template documents
//! authored elsewhere; this module's job is selecting the right document for
//! a (project type, target) pair, substituting `{{Token}}` placeholders and
//! making sure the result is still valid JSON before it goes on the wire.
//!
//! Tokens for resources a run did not provision (a short-circuited endpoint,
//! for instance) substitute to the empty string so the rendered document
//! stays well-formed rather than carrying a dangling placeholder.

use anyhow::Context;
use async_trait::async_trait;
use rigger_core::{ProjectType, Target};
use serde_json::Value;
use std::path::PathBuf;

/// Token-to-value map applied to a template.
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    entries: Vec<(String, String)>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `{{token}}` to be replaced by `value`.
    pub fn set(&mut self, token: &str, value: impl Into<String>) -> &mut Self {
        self.entries.push((format!("{{{{{token}}}}}"), value.into()));
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        let needle = format!("{{{{{token}}}}}");
        self.entries
            .iter()
            .find(|(k, _)| *k == needle)
            .map(|(_, v)| v.as_str())
    }
}

/// Substitute every registered token in `template`.
pub fn render(template: &str, tokens: &TokenMap) -> String {
    let mut out = template.to_string();
    for (token, value) in &tokens.entries {
        out = out.replace(token, value);
    }
    out
}

/// Substitute tokens and parse the result as JSON. A template that does not
/// render to valid JSON is a hard error; posting it would only produce a
/// less useful one from the server.
pub fn render_json(template: &str, tokens: &TokenMap) -> anyhow::Result<Value> {
    let rendered = render(template, tokens);
    serde_json::from_str(&rendered).context("rendered template is not valid JSON")
}

/// Supplies raw template text for build and release payloads.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn build_template(&self, project_type: ProjectType, target: Target)
    -> anyhow::Result<String>;

    async fn release_template(
        &self,
        project_type: ProjectType,
        target: Target,
    ) -> anyhow::Result<String>;
}

/// Loads templates from a directory, one file per (project type, target):
/// `asp_build.json`, `asp_docker_build.json`, `asp_release.json`,
/// `asp_docker_release.json`, and likewise for `node` and `java`.
#[derive(Debug, Clone)]
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_name(project_type: ProjectType, target: Target, kind: &str) -> String {
        match target {
            Target::AppService => format!("{}_{kind}.json", project_type.as_str()),
            Target::Docker => format!("{}_docker_{kind}.json", project_type.as_str()),
        }
    }

    async fn read(&self, name: &str) -> anyhow::Result<String> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read template {}", path.display()))
    }
}

#[async_trait]
impl TemplateSource for DirTemplates {
    async fn build_template(
        &self,
        project_type: ProjectType,
        target: Target,
    ) -> anyhow::Result<String> {
        self.read(&Self::file_name(project_type, target, "build")).await
    }

    async fn release_template(
        &self,
        project_type: ProjectType,
        target: Target,
    ) -> anyhow::Result<String> {
        self.read(&Self::file_name(project_type, target, "release"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_tokens() {
        let mut tokens = TokenMap::new();
        tokens.set("ReleaseDefName", "e2eDemo-CD").set("QueueId", "420");

        let rendered = render(
            r#"{"name": "{{ReleaseDefName}}", "queueId": {{QueueId}}}"#,
            &tokens,
        );
        assert_eq!(rendered, r#"{"name": "e2eDemo-CD", "queueId": 420}"#);
    }

    #[test]
    fn test_render_json_round_trips() {
        let mut tokens = TokenMap::new();
        tokens.set("BuildDefName", "e2eDemo-CI");

        let value = render_json(r#"{"name": "{{BuildDefName}}"}"#, &tokens).unwrap();
        assert_eq!(value["name"], "e2eDemo-CI");
    }

    #[test]
    fn test_render_json_rejects_garbage() {
        let tokens = TokenMap::new();
        assert!(render_json("not json", &tokens).is_err());
    }

    #[test]
    fn test_absent_token_substitutes_empty() {
        let mut tokens = TokenMap::new();
        tokens.set("AzureEndpointId", "");

        let value = render_json(r#"{"endpoint": "{{AzureEndpointId}}"}"#, &tokens).unwrap();
        assert_eq!(value["endpoint"], "");
    }

    #[test]
    fn test_template_file_names() {
        assert_eq!(
            DirTemplates::file_name(ProjectType::Asp, Target::AppService, "build"),
            "asp_build.json"
        );
        assert_eq!(
            DirTemplates::file_name(ProjectType::Node, Target::Docker, "build"),
            "node_docker_build.json"
        );
        assert_eq!(
            DirTemplates::file_name(ProjectType::Java, Target::Docker, "release"),
            "java_docker_release.json"
        );
    }
}
