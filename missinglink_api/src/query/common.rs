//! Shared query infrastructure: the [`Query`] trait and [`SortDirection`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by query builders.
///
/// Implementors list their parameters once; the raw query string and the
/// URL form are both derived from that list.
pub trait Query {
    /// Parameter names and unencoded values, in output order.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Renders the parameters as `name=value` joined by `&`, without a
    /// leading `?` and without any escaping.
    fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Returns a copy of `url` carrying this query. Any existing query on
    /// `url` is replaced and every value is form-encoded, so a value can
    /// never introduce a parameter of its own.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.set_query(None);
        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in &pairs {
                query.append_pair(name, value);
            }
        }
        url
    }
}

/// Sort order for a single field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order. This is the default.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Suffix appended to the field name in an `orderBy` list.
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            SortDirection::Asc => "",
            SortDirection::Desc => " desc",
        }
    }
}

impl From<bool> for SortDirection {
    /// `true` means descending.
    fn from(descending: bool) -> Self {
        if descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}
