//! Limn dashboards: named tabs of graph ids.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use limn_model::Slug;

use crate::common::{DASHBOARDS_DIR, ensure_output_dir, write_json};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub name: String,
    pub graph_ids: Vec<String>,
}

impl Tab {
    pub fn new<I, S>(name: impl Into<String>, graph_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            graph_ids: graph_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// A dashboard document. Graph ids are never checked against existing
/// graphs, so dashboards can be written before the graphs they list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    id: Slug,
    title: String,
    heading: String,
    subhead: String,
    tabs: Vec<Tab>,
}

impl Dashboard {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        heading: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: Slug::new(id)?,
            title: title.into(),
            heading: heading.into(),
            subhead: String::new(),
            tabs: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_subhead(mut self, subhead: impl Into<String>) -> Self {
        self.subhead = subhead.into();
        self
    }

    #[must_use]
    pub fn with_tabs(mut self, tabs: impl IntoIterator<Item = Tab>) -> Self {
        self.tabs = tabs.into_iter().collect();
        self
    }

    /// Appends a tab. Repeated names produce separate tabs.
    pub fn add_tab<I, S>(&mut self, name: impl Into<String>, graph_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tabs.push(Tab::new(name, graph_ids));
        self
    }

    pub fn id(&self) -> &Slug {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn subhead(&self) -> &str {
        &self.subhead
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Writes `dashboards/{id}.json` under `basedir`.
    pub fn write(&self, basedir: impl AsRef<Path>) -> Result<PathBuf> {
        let path =
            ensure_output_dir(basedir.as_ref(), DASHBOARDS_DIR)?.join(format!("{}.json", self.id));
        write_json(&path, self)?;
        info!(id = %self.id, tabs = self.tabs.len(), path = %path.display(), "wrote dashboard");
        Ok(path)
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tab_appends_duplicates() {
        let mut dashboard = Dashboard::new("d", "D", "H").unwrap();
        dashboard.add_tab("core", ["g1"]).add_tab("core", ["g2", "g3"]);
        assert_eq!(
            dashboard.tabs(),
            [Tab::new("core", ["g1"]), Tab::new("core", ["g2", "g3"])]
        );
    }

    #[test]
    fn test_display_is_json() {
        let dashboard = Dashboard::new("d", "D", "H")
            .unwrap()
            .with_subhead("S")
            .with_tabs([Tab::new("core", ["g1"])]);
        insta::assert_snapshot!(dashboard.to_string(), @r#"
        {
          "id": "d",
          "title": "D",
          "heading": "H",
          "subhead": "S",
          "tabs": [
            {
              "name": "core",
              "graph_ids": [
                "g1"
              ]
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_invalid_id() {
        assert!(Dashboard::new("", "D", "H").is_err());
    }
}
