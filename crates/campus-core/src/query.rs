//! The filter/sort pipeline shared by every listing page.
//!
//! A listing is: keep the records that match a free-text query and any
//! categorical filters, then stable-sort them by one key in one direction.
//! The per-entity query types in [`crate::listing`] plug their fields into
//! the pieces defined here.

use std::{borrow::Borrow, cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ─── Text match ──────────────────────────────────────────────────────────────

/// Case-insensitive substring match of `query` against any of `fields`.
/// An empty query matches everything.
pub fn text_matches<'a>(
  query: &str,
  fields: impl IntoIterator<Item = &'a str>,
) -> bool {
  if query.is_empty() {
    return true;
  }
  let needle = query.to_lowercase();
  fields
    .into_iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

// ─── Categorical filter ──────────────────────────────────────────────────────

/// Exact-match filter on one field, or [`Filter::All`] to let everything
/// through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter<T> {
  #[default]
  All,
  Only(T),
}

impl<T> Filter<T> {
  pub fn matches<Q>(&self, value: &Q) -> bool
  where
    T: Borrow<Q>,
    Q: PartialEq + ?Sized,
  {
    match self {
      Self::All => true,
      Self::Only(wanted) => wanted.borrow() == value,
    }
  }

  pub fn is_all(&self) -> bool { matches!(self, Self::All) }

  pub fn as_option(&self) -> Option<&T> {
    match self {
      Self::All => None,
      Self::Only(v) => Some(v),
    }
  }
}

impl<T: Clone + PartialEq> Filter<T> {
  /// Step through `All → options[0] → … → options[n-1] → All`.
  ///
  /// A value not present in `options` steps back to `All`.
  pub fn cycle(&self, options: &[T]) -> Self {
    match self {
      Self::All => options.first().cloned().map_or(Self::All, Self::Only),
      Self::Only(current) => options
        .iter()
        .position(|o| o == current)
        .and_then(|i| options.get(i + 1))
        .cloned()
        .map_or(Self::All, Self::Only),
    }
  }
}

/// `"all"` (any case) parses as [`Filter::All`]; anything else goes through
/// `T::from_str`.
impl<T: FromStr> FromStr for Filter<T> {
  type Err = T::Err;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("all") {
      Ok(Self::All)
    } else {
      s.parse().map(Self::Only)
    }
  }
}

/// Parse a filter value or sort key by name. `kind` names what was being
/// parsed in the error.
pub fn parse_named<T: FromStr>(kind: &'static str, value: &str) -> crate::Result<T> {
  value.parse().map_err(|_| crate::Error::UnknownName {
    kind,
    value: value.to_owned(),
  })
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl SortDirection {
  pub fn flipped(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }

  /// Apply this direction to an ascending comparison.
  pub fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      Self::Asc => ordering,
      Self::Desc => ordering.reverse(),
    }
  }
}

/// A sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort<K> {
  pub key:       K,
  pub direction: SortDirection,
}

impl<K: Copy + PartialEq> Sort<K> {
  pub fn asc(key: K) -> Self {
    Self {
      key,
      direction: SortDirection::Asc,
    }
  }

  pub fn desc(key: K) -> Self {
    Self {
      key,
      direction: SortDirection::Desc,
    }
  }

  /// Column-header behaviour: picking the current key flips the direction,
  /// picking a different key switches to it ascending.
  pub fn toggle(&mut self, key: K) {
    if self.key == key {
      self.direction = self.direction.flipped();
    } else {
      *self = Self::asc(key);
    }
  }
}

/// Locale-style string ordering.
///
/// Letters compare case-insensitively first; only strings that are equal
/// ignoring case are then ordered character by character with lowercase
/// before uppercase (`"apple" < "Apple" < "banana"`).
pub fn collate(a: &str, b: &str) -> Ordering {
  let folded = a
    .chars()
    .flat_map(char::to_lowercase)
    .cmp(b.chars().flat_map(char::to_lowercase));
  folded.then_with(|| {
    a.chars()
      .zip(b.chars())
      .map(|(x, y)| case_rank(x).cmp(&case_rank(y)))
      .find(|o| o.is_ne())
      .unwrap_or_else(|| a.chars().count().cmp(&b.chars().count()))
  })
}

fn case_rank(c: char) -> u8 { u8::from(c.is_uppercase()) }

// ─── Listing ─────────────────────────────────────────────────────────────────

/// The outcome of a pipeline run: matched records in display order plus the
/// size of the source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
  pub items: Vec<T>,
  pub total: usize,
}

impl<T> Listing<T> {
  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// `Showing N of M <noun>`.
  pub fn summary(&self, noun: &str) -> String {
    format!("Showing {} of {} {noun}", self.items.len(), self.total)
  }
}

/// Filter `source` with `keep`, then stable-sort with `compare` when given.
pub fn run<T, K, C>(
  source: impl IntoIterator<Item = T>,
  keep: K,
  compare: Option<C>,
) -> Listing<T>
where
  K: Fn(&T) -> bool,
  C: Fn(&T, &T) -> Ordering,
{
  let mut total = 0;
  let mut items: Vec<T> = source
    .into_iter()
    .inspect(|_| total += 1)
    .filter(|item| keep(item))
    .collect();
  if let Some(compare) = compare {
    items.sort_by(|a, b| compare(a, b));
  }
  Listing { items, total }
}
