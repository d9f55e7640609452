//! Names under which the default analyses are registered.
//!
//! Per-type analyses are prefixed with the resource type, e.g. `cpuhours`
//! and `gpuhours`.

use tide_core::resource::ResourceType;

pub const CPU_ONLY_JOBS: &str = "cpuonlyjobs";
pub const UNIQUE_NS_LIST: &str = "uniquenslist";
pub const UNIQUE_NS_COUNT: &str = "uniquenscount";
pub const ALL_JOBS_TOTAL: &str = "alljobstotal";
pub const ALL_HOURS_TOTAL: &str = "allhourstotal";

pub fn hours(resource: &ResourceType) -> String { format!("{resource}hours") }

pub fn hours_total(resource: &ResourceType) -> String {
  format!("{resource}hourstotal")
}

pub fn jobs(resource: &ResourceType) -> String { format!("{resource}jobs") }

pub fn jobs_total(resource: &ResourceType) -> String {
  format!("{resource}jobstotal")
}
