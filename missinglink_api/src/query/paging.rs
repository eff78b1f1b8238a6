//! Paging and sorting parameters for collection endpoints.

use super::common::{Query, SortDirection};

/// Upper bound and fallback for the page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    max_page_size: u32,
    default_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_page_size: 250,
            default_page_size: 50,
        }
    }
}

impl PageLimits {
    /// A zero maximum is raised to 1 and the default is clamped into
    /// `[1, max_page_size]`, so every `PageLimits` value is usable.
    pub fn new(max_page_size: u32, default_page_size: u32) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            max_page_size,
            default_page_size: default_page_size.clamp(1, max_page_size),
        }
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Above the maximum → maximum; below 1 → default.
    pub fn clamp(&self, page_size: i64) -> u32 {
        if page_size > i64::from(self.max_page_size) {
            self.max_page_size
        } else if page_size < 1 {
            self.default_page_size
        } else {
            page_size as u32
        }
    }
}

/// Requested page, page size and field ordering for a collection request.
///
/// Inputs are sanitized rather than rejected: the page number never drops
/// below 1 and the page size always lies in `[1, max_page_size]`. Sort fields
/// keep the order they were first added in; adding a field again only
/// changes its direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagingSortSpec {
    page_number: u32,
    page_size: u32,
    limits: PageLimits,
    sort: Vec<(String, SortDirection)>,
}

impl Default for PagingSortSpec {
    fn default() -> Self {
        Self::with_limits(PageLimits::default())
    }
}

impl PagingSortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spec on page 1 with the default page size of `limits`.
    pub fn with_limits(limits: PageLimits) -> Self {
        Self {
            page_number: 1,
            page_size: limits.default_page_size(),
            limits,
            sort: Vec::new(),
        }
    }

    /// Sets the page number (1-indexed). Values below 1 become 1.
    pub fn with_page(mut self, page: i64) -> Self {
        self.set_page(page);
        self
    }

    /// Sets the number of results per page, clamped by the limits.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Appends a sort field, or updates the direction of one already present.
    pub fn with_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.add_sort(field, direction);
        self
    }

    pub fn with_sorts<'a, I>(mut self, sorts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, SortDirection)>,
    {
        for (field, direction) in sorts {
            self.add_sort(field, direction);
        }
        self
    }

    pub fn set_page(&mut self, page: i64) {
        self.page_number = page.clamp(1, i64::from(u32::MAX)) as u32;
    }

    pub fn set_page_size(&mut self, page_size: i64) {
        self.page_size = self.limits.clamp(page_size);
    }

    pub fn add_sort(&mut self, field: &str, direction: SortDirection) {
        match self.sort.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = direction,
            None => self.sort.push((field.to_string(), direction)),
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    pub fn sort_criteria(&self) -> &[(String, SortDirection)] {
        &self.sort
    }
}

impl Query for PagingSortSpec {
    /// `pageNumber`, `pageSize` and, when any sort field is set, `orderBy`
    /// as `<field>[ desc],...`. Every sort field is followed by a comma,
    /// including the last one.
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("pageNumber", self.page_number.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if !self.sort.is_empty() {
            let order_by: String = self
                .sort
                .iter()
                .map(|(field, direction)| format!("{}{},", field, direction.suffix()))
                .collect();
            pairs.push(("orderBy", order_by));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_page_default_size() {
        let spec = PagingSortSpec::default();
        assert_eq!(spec.page_number(), 1);
        assert_eq!(spec.page_size(), 50);
        assert!(spec.sort_criteria().is_empty());
        assert_eq!(spec.to_query_string(), "pageNumber=1&pageSize=50");
    }

    #[test]
    fn page_size_clamps_both_bounds() {
        let limits = PageLimits::default();
        for (input, expected) in [
            (-5, 50),
            (0, 50),
            (1, 1),
            (20, 20),
            (250, 250),
            (251, 250),
            (i64::MAX, 250),
        ] {
            assert_eq!(limits.clamp(input), expected, "input {input}");
            assert_eq!(
                PagingSortSpec::default()
                    .with_page_size(input)
                    .page_size(),
                expected
            );
        }
    }

    #[test]
    fn custom_limits_apply() {
        let spec = PagingSortSpec::with_limits(PageLimits::new(100, 25));
        assert_eq!(spec.page_size(), 25);
        assert_eq!(spec.clone().with_page_size(500).page_size(), 100);
        assert_eq!(spec.with_page_size(0).page_size(), 25);
    }

    #[test]
    fn limits_are_sanitized() {
        let limits = PageLimits::new(0, 0);
        assert_eq!(limits.max_page_size(), 1);
        assert_eq!(limits.default_page_size(), 1);

        let limits = PageLimits::new(10, 50);
        assert_eq!(limits.default_page_size(), 10);
    }

    #[test]
    fn page_number_never_below_one() {
        assert_eq!(PagingSortSpec::new().with_page(0).page_number(), 1);
        assert_eq!(PagingSortSpec::new().with_page(-3).page_number(), 1);
        assert_eq!(PagingSortSpec::new().with_page(7).page_number(), 7);
    }

    #[test]
    fn sort_keeps_insertion_order_with_trailing_comma() {
        let spec = PagingSortSpec::new()
            .with_sort("name", SortDirection::Asc)
            .with_sort("instructionDate", SortDirection::Desc);
        assert_eq!(
            spec.to_query_string(),
            "pageNumber=1&pageSize=50&orderBy=name,instructionDate desc,"
        );
    }

    #[test]
    fn sort_is_not_reordered_alphabetically() {
        let spec = PagingSortSpec::new()
            .with_sort("zeta", SortDirection::Asc)
            .with_sort("alpha", SortDirection::Asc);
        assert!(spec.to_query_string().ends_with("orderBy=zeta,alpha,"));
    }

    #[test]
    fn re_adding_a_field_updates_direction_in_place() {
        let spec = PagingSortSpec::new()
            .with_sort("a", SortDirection::Asc)
            .with_sort("b", SortDirection::Asc)
            .with_sort("a", SortDirection::Desc);
        assert_eq!(
            spec.sort_criteria(),
            &[
                ("a".to_string(), SortDirection::Desc),
                ("b".to_string(), SortDirection::Asc)
            ]
        );
    }

    #[test]
    fn add_to_url_encodes_spaces() {
        let url = url::Url::parse("https://example.com/api/Case").unwrap();
        let spec = PagingSortSpec::new().with_sort("InstructionDate", SortDirection::Desc);
        let url = spec.add_to_url(&url);
        assert_eq!(
            url.as_str(),
            "https://example.com/api/Case?pageNumber=1&pageSize=50&orderBy=InstructionDate+desc%2C"
        );
        let order_by = url
            .query_pairs()
            .find(|(k, _)| k == "orderBy")
            .map(|(_, v)| v.into_owned());
        assert_eq!(order_by.as_deref(), Some("InstructionDate desc,"));
    }

    #[test]
    fn reserved_characters_in_field_names_stay_inside_order_by() {
        let base = url::Url::parse("https://example.com/api/Case").unwrap();
        let url = PagingSortSpec::new()
            .with_page_size(10)
            .with_sort("name&pageSize=9999", SortDirection::Asc)
            .with_sort("a+b", SortDirection::Desc)
            .add_to_url(&base);

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("pageNumber".to_string(), "1".to_string()),
                ("pageSize".to_string(), "10".to_string()),
                ("orderBy".to_string(), "name&pageSize=9999,a+b desc,".to_string()),
            ]
        );
    }

    #[test]
    fn clear_sort_drops_order_by() {
        let mut spec = PagingSortSpec::new()
            .with_sort("name", SortDirection::Asc)
            .with_page(2);
        spec.clear_sort();
        assert!(spec.sort_criteria().is_empty());
        assert_eq!(spec.to_query_string(), "pageNumber=2&pageSize=50");

        spec.add_sort("reference", SortDirection::Desc);
        assert_eq!(
            spec.to_query_string(),
            "pageNumber=2&pageSize=50&orderBy=reference desc,"
        );
    }
}
