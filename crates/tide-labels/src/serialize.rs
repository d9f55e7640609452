//! Header encoder: the inverse of the header parser.

use tide_core::label::LabelSet;

pub(crate) fn encode_header(labels: &LabelSet) -> String {
  let pairs: Vec<String> = labels
    .iter()
    .map(|(key, value)| format!("{key}=\"{value}\""))
    .collect();
  format!("{{{}}}", pairs.join(", "))
}
