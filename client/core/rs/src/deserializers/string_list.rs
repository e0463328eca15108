//! # String list deserializer.
//!
//! Accepts either a sequence of strings, or a single string
//! with items separated by commas or newlines.
//! Eg. `aliases = "stg, s"` and `aliases = ["stg", "s"]` are the same.

use serde::{Deserializer, de::Visitor};

pub fn string_list_deserializer<'de, D>(
  deserializer: D,
) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  deserializer.deserialize_any(StringListVisitor)
}

struct StringListVisitor;

impl<'de> Visitor<'de> for StringListVisitor {
  type Value = Vec<String>;

  fn expecting(
    &self,
    formatter: &mut std::fmt::Formatter,
  ) -> std::fmt::Result {
    write!(formatter, "string or Vec<String>")
  }

  fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
  where
    E: serde::de::Error,
  {
    Ok(
      v.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect(),
    )
  }

  fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
  where
    A: serde::de::SeqAccess<'de>,
  {
    let mut res = Vec::new();
    while let Some(item) = seq.next_element::<String>()? {
      res.push(item);
    }
    Ok(res)
  }

  fn visit_unit<E>(self) -> Result<Self::Value, E>
  where
    E: serde::de::Error,
  {
    Ok(Vec::new())
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;

  use super::*;

  #[derive(Deserialize)]
  struct Aliases {
    #[serde(deserialize_with = "string_list_deserializer")]
    aliases: Vec<String>,
  }

  #[test]
  fn comma_separated_string() {
    let res: Aliases =
      serde_json::from_str(r#"{ "aliases": "stg, s,\nstaging" }"#)
        .unwrap();
    assert_eq!(res.aliases, ["stg", "s", "staging"]);
  }

  #[test]
  fn sequence() {
    let res: Aliases =
      serde_json::from_str(r#"{ "aliases": ["stg", "s"] }"#).unwrap();
    assert_eq!(res.aliases, ["stg", "s"]);
  }
}
