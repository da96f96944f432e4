use db::listing::{Numeric, DEFAULT_LIMIT, DEFAULT_PAGE};
use serde::Deserialize;

/// Raw page selection query parameters.
///
/// Values are kept as strings, so malformed numbers produce an empty page
/// instead of a rejected request.
#[derive(Deserialize, Default)]
pub struct Pagination {
    #[serde(default)]
    page: Option<String>,

    #[serde(default)]
    limit: Option<String>,
}

impl Pagination {
    pub fn page(&self) -> Numeric {
        Numeric::parse(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> Numeric {
        Numeric::parse(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use db::listing::Numeric;

    use super::Pagination;

    #[test]
    fn defaults() {
        let pagination = Pagination::default();

        assert_eq!(pagination.page(), Numeric::Value(1));
        assert_eq!(pagination.limit(), Numeric::Value(9));
    }

    #[test]
    fn malformed_values() {
        let pagination = Pagination {
            page: Some(String::from("two")),
            limit: Some(String::from("5")),
        };

        assert_eq!(pagination.page(), Numeric::Invalid);
        assert_eq!(pagination.limit(), Numeric::Value(5));
    }
}
