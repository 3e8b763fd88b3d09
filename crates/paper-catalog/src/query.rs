//! Query-string builder for the provider's filter/pagination/sort convention.
//!
//! The listing endpoint is currently fetched without parameters; this
//! builder documents the parameter convention the provider understands
//! (`filters[key]=value`, `pagination[page]=N`, `pagination[pageSize]=N`,
//! `sort[i]=expr`) for an eventual move of filtering and sorting to the
//! server. Nothing wires it into the fetch call yet, on purpose.

use url::form_urlencoded::Serializer;

/// Page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
}

/// Parameters for a catalog listing request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Field filters, in insertion order.
    pub filters: Vec<(String, String)>,
    /// Optional pagination.
    pub pagination: Option<Pagination>,
    /// Ordered sort expressions (e.g. `year:desc`).
    pub sort: Vec<String>,
}

impl QueryParams {
    /// Add a field filter.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Select a page.
    #[must_use]
    pub fn paginate(mut self, page: usize, page_size: usize) -> Self {
        self.pagination = Some(Pagination { page, page_size });
        self
    }

    /// Append a sort expression.
    #[must_use]
    pub fn sort_by(mut self, expr: impl Into<String>) -> Self {
        self.sort.push(expr.into());
        self
    }

    /// Encode as a URL query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = Serializer::new(String::new());

        for (key, value) in &self.filters {
            serializer.append_pair(&format!("filters[{key}]"), value);
        }

        if let Some(pagination) = self.pagination {
            serializer.append_pair("pagination[page]", &pagination.page.to_string());
            serializer.append_pair("pagination[pageSize]", &pagination.page_size.to_string());
        }

        for (index, expr) in self.sort.iter().enumerate() {
            serializer.append_pair(&format!("sort[{index}]"), expr);
        }

        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_yield_empty_string() {
        assert_eq!(QueryParams::default().to_query_string(), "");
    }

    #[test]
    fn test_full_convention() {
        let query = QueryParams::default()
            .filter("journal", "Nature")
            .paginate(2, 10)
            .sort_by("year:desc")
            .sort_by("title:asc")
            .to_query_string();

        assert_eq!(
            query,
            "filters%5Bjournal%5D=Nature\
             &pagination%5Bpage%5D=2&pagination%5BpageSize%5D=10\
             &sort%5B0%5D=year%3Adesc&sort%5B1%5D=title%3Aasc"
        );
    }

    #[test]
    fn test_values_are_url_encoded() {
        let query = QueryParams::default().filter("title", "deep learning").to_query_string();
        assert_eq!(query, "filters%5Btitle%5D=deep+learning");
    }
}
