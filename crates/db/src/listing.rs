//! Club listing search.
//!
//! A [`ListingQuery`] is assembled from untrusted query string values and
//! turned into a [`ListingFilter`], an optional [`ListingSort`] and a page
//! window, which are then executed against a [`ListingStore`].
//!
//! Nothing in here rejects a request. Unknown sort keys disable sorting,
//! unknown sort orders mean descending order, and a page or limit that is
//! not a positive integer (non-numeric input included) yields an empty page
//! while still reporting the total amount of matching listings.

use std::cmp::Ordering;

use async_trait::async_trait;
use futures_util::try_join;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::club;

/// Page number used when the request does not provide one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request does not provide one.
pub const DEFAULT_LIMIT: i64 = 9;

/// Integer query string parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Numeric {
    /// Parsed integer value.
    Value(i64),

    /// Value that is not an integer.
    Invalid,
}

impl Numeric {
    /// Parse an optional query string value.
    ///
    /// Absent and empty values fall back to `default`.
    ///
    /// ## Example
    ///
    /// ```
    /// use db::listing::Numeric;
    ///
    /// assert_eq!(Numeric::parse(None, 9), Numeric::Value(9));
    /// assert_eq!(Numeric::parse(Some("3"), 9), Numeric::Value(3));
    /// assert_eq!(Numeric::parse(Some("three"), 9), Numeric::Invalid);
    /// ```
    pub fn parse(value: Option<&str>, default: i64) -> Self {
        match value.map(str::trim) {
            None | Some("") => Numeric::Value(default),
            Some(value) => value
                .parse()
                .map(Numeric::Value)
                .unwrap_or(Numeric::Invalid),
        }
    }

    /// Get the parsed value, if any.
    pub fn value(self) -> Option<i64> {
        match self {
            Numeric::Value(value) => Some(value),
            Numeric::Invalid => None,
        }
    }

    fn positive(self) -> Option<u64> {
        match self {
            Numeric::Value(value) if value > 0 => Some(value as u64),
            _ => None,
        }
    }
}

/// Listing search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring of a club name, university name or country.
    pub search: Option<String>,

    /// Exact club category.
    pub category: Option<String>,

    /// Sort key, either `fees` or `date`.
    pub sort_by: Option<String>,

    /// Sort order, `asc` for ascending order.
    pub order: Option<String>,

    /// 1-based page number.
    pub page: Numeric,

    /// Page size.
    pub limit: Numeric,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort_by: None,
            order: None,
            page: Numeric::Value(DEFAULT_PAGE),
            limit: Numeric::Value(DEFAULT_LIMIT),
        }
    }
}

/// Listing predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilter {
    search: Option<String>,
    category: Option<String>,
}

impl ListingFilter {
    /// Check if the provided club satisfies this filter.
    pub fn matches(&self, club: &club::Model) -> bool {
        let search_matches = self.search.as_ref().map_or(true, |search| {
            let needle = search.to_lowercase();

            [
                &club.club_name,
                &club.university_name,
                &club.university_country,
            ]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
        });

        let category_matches = self
            .category
            .as_ref()
            .map_or(true, |category| club.category == *category);

        search_matches && category_matches
    }

    /// Convert this filter into a database condition.
    ///
    /// Case folding relies on the database `LOWER` function. PostgreSQL folds
    /// the full Unicode range, SQLite folds ASCII letters only, so on SQLite
    /// non-ASCII text is matched case-sensitively unlike [`Self::matches`].
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));

            condition = condition.add(
                Condition::any()
                    .add(lower_like(club::Column::ClubName, &pattern))
                    .add(lower_like(club::Column::UniversityName, &pattern))
                    .add(lower_like(club::Column::UniversityCountry, &pattern)),
            );
        }

        if let Some(category) = &self.category {
            condition = condition.add(club::Column::Category.eq(category.as_str()));
        }

        condition
    }
}

/// Escape `LIKE` wildcards using a backslash.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

fn lower_like(column: club::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::str(pattern).escape('\\'))
}

/// Listing sort key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Application fee.
    Fees,

    /// Publication date.
    Date,
}

/// Listing sort order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Single-key listing sort.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListingSort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl ListingSort {
    /// Compare two clubs according to this sort.
    pub fn compare(&self, a: &club::Model, b: &club::Model) -> Ordering {
        let ordering = match self.key {
            SortKey::Fees => a.application_fees.total_cmp(&b.application_fees),
            SortKey::Date => a.posted_date.cmp(&b.posted_date),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    fn column(&self) -> club::Column {
        match self.key {
            SortKey::Fees => club::Column::ApplicationFees,
            SortKey::Date => club::Column::PostedDate,
        }
    }

    fn db_order(&self) -> Order {
        match self.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Single page of listings.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Listings of the requested page.
    pub data: Vec<T>,

    /// Count of all listings that match the filter.
    pub total: u64,

    /// Requested page number, if it was numeric.
    pub page: Option<i64>,

    /// Total page count, if the page size was a positive number.
    pub total_pages: Option<u64>,
}

/// Storage capability used to execute listing searches.
#[async_trait]
pub trait ListingStore: Sync {
    /// Count all listings that match the filter.
    async fn count(&self, filter: &ListingFilter) -> Result<u64, DbErr>;

    /// Fetch at most `limit` matching listings, skipping the first `skip` ones.
    async fn find(
        &self,
        filter: &ListingFilter,
        sort: Option<ListingSort>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<club::Model>, DbErr>;
}

#[async_trait]
impl ListingStore for DatabaseConnection {
    async fn count(&self, filter: &ListingFilter) -> Result<u64, DbErr> {
        club::Entity::find()
            .filter(filter.condition())
            .count(self)
            .await
    }

    async fn find(
        &self,
        filter: &ListingFilter,
        sort: Option<ListingSort>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<club::Model>, DbErr> {
        let mut select = club::Entity::find().filter(filter.condition());

        if let Some(sort) = sort {
            select = select.order_by(sort.column(), sort.db_order());
        }

        select.offset(skip).limit(limit).all(self).await
    }
}

/// Build a listing predicate from the search and category parameters.
///
/// Empty values do not constrain the result.
pub fn build_filter(query: &ListingQuery) -> ListingFilter {
    ListingFilter {
        search: non_empty(&query.search),
        category: non_empty(&query.category),
    }
}

/// Build a listing sort from the sort key and order parameters.
///
/// Returns [`None`] for absent or unrecognized sort keys. Any order other
/// than `asc` is treated as descending.
pub fn build_sort(query: &ListingQuery) -> Option<ListingSort> {
    let key = match query.sort_by.as_deref() {
        Some("fees") => SortKey::Fees,
        Some("date") => SortKey::Date,
        _ => return None,
    };

    let order = match query.order.as_deref() {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    Some(ListingSort { key, order })
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|value| !value.is_empty()).cloned()
}

/// Compute the offset and size of the requested page.
///
/// Returns [`None`] if the parameters do not describe a valid page.
/// Offsets are bound as signed 64-bit integers, so a page that starts past
/// [`i64::MAX`] is not valid either.
pub fn window(page: Numeric, limit: Numeric) -> Option<(u64, u64)> {
    let limit = limit.positive()?;
    let skip = (page.positive()? - 1)
        .checked_mul(limit)
        .filter(|skip| i64::try_from(*skip).is_ok())?;

    Some((skip, limit))
}

/// Fetch a single page of listings matching the filter.
///
/// Counting and fetching are independent store calls and run concurrently.
pub async fn paginate<S>(
    store: &S,
    filter: &ListingFilter,
    sort: Option<ListingSort>,
    page: Numeric,
    limit: Numeric,
) -> Result<Page<club::Model>, DbErr>
where
    S: ListingStore + ?Sized,
{
    let (total, data) = match window(page, limit) {
        Some((skip, size)) => try_join!(store.count(filter), store.find(filter, sort, skip, size))?,
        None => (store.count(filter).await?, Vec::new()),
    };

    let total_pages = limit
        .positive()
        .map(|limit| total / limit + u64::from(total % limit != 0));

    Ok(Page {
        data,
        total,
        page: page.value(),
        total_pages,
    })
}

/// Execute a listing search request.
pub async fn search<S>(store: &S, query: &ListingQuery) -> Result<Page<club::Model>, DbErr>
where
    S: ListingStore + ?Sized,
{
    paginate(
        store,
        &build_filter(query),
        build_sort(query),
        query.page,
        query.limit,
    )
    .await
}
