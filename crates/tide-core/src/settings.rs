//! Runtime settings, passed explicitly to every component that needs them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{period::Zone, resource::ResourceType};

/// Which analyses to run for each resource type and for each period summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPlan {
  pub per_type: BTreeMap<ResourceType, Vec<String>>,
  pub summary:  Vec<String>,
}

/// Settings shared by ingestion, resolution and the analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Logical resource type → raw value of the `resource` label.
  pub type_strings: BTreeMap<ResourceType, String>,
  /// Zone in which calendar months are computed.
  pub timezone:     Zone,
  /// Groups whose reduced value falls below this are dropped from rankings.
  pub min_value:    f64,
  /// Maximum number of nested analyses on the resolution stack.
  pub max_depth:    usize,
  pub analyses:     AnalysisPlan,
}

impl Default for Settings {
  fn default() -> Self {
    let type_strings = BTreeMap::from([
      (ResourceType::cpu(), "cpu".to_string()),
      (ResourceType::gpu(), "nvidia_com_gpu".to_string()),
    ]);

    let per_type = BTreeMap::from([
      (
        ResourceType::cpu(),
        [
          "cpuhours",
          "cpuhourstotal",
          "cpujobs",
          "cpuonlyjobs",
          "cpujobstotal",
          "uniquenslist",
          "uniquenscount",
        ]
        .map(String::from)
        .to_vec(),
      ),
      (
        ResourceType::gpu(),
        ["gpuhours", "gpuhourstotal", "gpujobs", "gpujobstotal"]
          .map(String::from)
          .to_vec(),
      ),
    ]);

    Self {
      type_strings,
      timezone: Zone::Local,
      min_value: 1e-3,
      max_depth: 64,
      analyses: AnalysisPlan {
        per_type,
        summary: ["alljobstotal", "allhourstotal"].map(String::from).to_vec(),
      },
    }
  }
}

impl Settings {
  /// Reverse lookup: the logical type whose raw label string is `raw`.
  pub fn resource_for(&self, raw: &str) -> Option<&ResourceType> {
    self
      .type_strings
      .iter()
      .find(|(_, value)| value.as_str() == raw)
      .map(|(resource, _)| resource)
  }
}
