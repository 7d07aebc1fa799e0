//! YAML rendering and parsing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use yaml_rust_davvid::{Yaml, YamlEmitter};

/// Serializes a report to YAML, emitting multi-line strings as literal blocks.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize report")?;
    let document = to_emitter_value(&value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter.dump(&document).context("Failed to emit YAML")?;

    Ok(output)
}

fn to_emitter_value(value: &serde_yaml::Value) -> Yaml {
    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Yaml::Integer(i)
            } else if let Some(f) = n.as_f64() {
                // Debug formatting keeps the decimal point on whole floats.
                Yaml::Real(format!("{f:?}"))
            } else {
                Yaml::String(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Yaml::Array(seq.iter().map(to_emitter_value).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut hash = yaml_rust_davvid::yaml::Hash::new();
            for (k, v) in map {
                hash.insert(to_emitter_value(k), to_emitter_value(v));
            }
            Yaml::Hash(hash)
        }
        serde_yaml::Value::Tagged(tagged) => to_emitter_value(&tagged.value),
    }
}

/// Parses a YAML document.
pub fn from_yaml<T: for<'de> Deserialize<'de>>(yaml: &str) -> Result<T> {
    serde_yaml::from_str(yaml).context("Failed to deserialize YAML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn floats_keep_their_decimal_point() {
        let mut map = BTreeMap::new();
        map.insert("feature", 100.0_f64);
        let yaml = to_yaml(&map).unwrap();
        assert!(yaml.contains("feature: 100.0"), "got: {yaml}");
    }

    #[test]
    fn multiline_strings_are_literal_blocks() {
        let mut map = BTreeMap::new();
        map.insert("message", "feat: add login\n\nWith a body");
        let yaml = to_yaml(&map).unwrap();
        assert!(yaml.contains('|'), "got: {yaml}");
        let parsed: BTreeMap<String, String> = from_yaml(&yaml).unwrap();
        assert_eq!(parsed["message"], "feat: add login\n\nWith a body");
    }
}
