//! Resolves human readable references into canonical ids.
//!
//! A listing response is a sequence of groups keyed by some auxiliary
//! attribute (eg. offerings keyed by version), each holding named
//! entries (eg. plans). A [NamedReference] must match exactly one
//! entry across all groups.

use std::future::Future;

use flags::Field;

/// A group of named entries inside a listing response.
pub trait ListingGroup {
  type Entry: ListingEntry;
  fn key(&self) -> Option<&str>;
  fn entries(&self) -> &[Self::Entry];
}

pub trait ListingEntry {
  fn name(&self) -> Option<&str>;
  fn id(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedReference {
  pub name: String,
  pub key: String,
}

/// Labels used to describe a reference in error messages.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceKind {
  /// eg. `plan`
  pub entry: &'static str,
  /// eg. `version`
  pub key: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
  #[error("Failed to {what}")]
  Lookup {
    what: &'static str,
    #[source]
    source: anyhow::Error,
  },

  #[error(
    "No {key_label} '{key}' found for {entry_label} '{name}'. Available: {available}"
  )]
  KeyNotFound {
    entry_label: &'static str,
    key_label: &'static str,
    name: String,
    key: String,
    available: String,
  },

  #[error(
    "No {entry_label} '{name}' found for {key_label} '{key}'. Available: {available}"
  )]
  NotFound {
    entry_label: &'static str,
    key_label: &'static str,
    name: String,
    key: String,
    available: String,
  },

  #[error("{entry_label} '{name}' for {key_label} '{key}' has no id")]
  MissingId {
    entry_label: &'static str,
    key_label: &'static str,
    name: String,
    key: String,
  },

  #[error(
    "{entry_label} '{name}' for {key_label} '{key}' is ambiguous, matching ids: {ids}"
  )]
  Ambiguous {
    entry_label: &'static str,
    key_label: &'static str,
    name: String,
    key: String,
    ids: String,
  },
}

/// Produces the final id field.
///
/// - A directly supplied id wins and no lookup is made.
/// - Otherwise, a named reference triggers exactly one `lookup`
///   and must match a single entry.
/// - With neither, the id stays unset.
pub async fn resolve_id<G, F, Fut>(
  direct: Field<String>,
  named: Option<&NamedReference>,
  kind: ReferenceKind,
  what: &'static str,
  lookup: F,
) -> Result<Field<String>, ResolveError>
where
  G: ListingGroup,
  F: FnOnce() -> Fut,
  Fut: Future<Output = anyhow::Result<Vec<G>>>,
{
  if direct.is_set() {
    return Ok(direct);
  }
  let Some(named) = named else {
    return Ok(Field::Unset);
  };
  let groups = lookup()
    .await
    .map_err(|source| ResolveError::Lookup { what, source })?;
  find_unique(&groups, named, kind).map(Field::Set)
}

/// Exact match on both the group key and the entry name.
pub fn find_unique<G: ListingGroup>(
  groups: &[G],
  reference: &NamedReference,
  kind: ReferenceKind,
) -> Result<String, ResolveError> {
  let matching_groups = groups
    .iter()
    .filter(|group| group.key() == Some(reference.key.as_str()))
    .collect::<Vec<_>>();

  if matching_groups.is_empty() {
    return Err(ResolveError::KeyNotFound {
      entry_label: kind.entry,
      key_label: kind.key,
      name: reference.name.clone(),
      key: reference.key.clone(),
      available: join_available(groups.iter().map(G::key)),
    });
  }

  let matches = matching_groups
    .iter()
    .flat_map(|group| group.entries())
    .filter(|entry| entry.name() == Some(reference.name.as_str()))
    .collect::<Vec<_>>();

  match matches.as_slice() {
    [entry] => entry.id().map(str::to_string).ok_or_else(|| {
      ResolveError::MissingId {
        entry_label: kind.entry,
        key_label: kind.key,
        name: reference.name.clone(),
        key: reference.key.clone(),
      }
    }),
    [] => Err(ResolveError::NotFound {
      entry_label: kind.entry,
      key_label: kind.key,
      name: reference.name.clone(),
      key: reference.key.clone(),
      available: join_available(
        matching_groups
          .iter()
          .flat_map(|group| group.entries())
          .map(ListingEntry::name),
      ),
    }),
    _ => Err(ResolveError::Ambiguous {
      entry_label: kind.entry,
      key_label: kind.key,
      name: reference.name.clone(),
      key: reference.key.clone(),
      ids: matches
        .iter()
        .map(|entry| entry.id().unwrap_or("<no id>"))
        .collect::<Vec<_>>()
        .join(", "),
    }),
  }
}

fn join_available<'a>(values: impl Iterator<Item = Option<&'a str>>) -> String {
  let values = values.flatten().collect::<Vec<_>>();
  if values.is_empty() {
    String::from("none")
  } else {
    values.join(", ")
  }
}
