//! Client list: search, order and page a set of client profiles.
//!
//! This is the server side of a controlled table. The result carries one
//! page of clients plus the total match count, which the table receives as
//! its `total_items`.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::options::{ClientQuery, ClientSort};
use crate::data::{Client, Record};
use crate::error::ProfileDeskError;
use crate::table::{compare_nulls_last, SortOrder};
use crate::Result;

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of clients with ages filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPage {
    pub clients: Vec<Client>,
    pub pagination: PageInfo,
}

/// Profile fields the search text is matched against.
const SEARCH_FIELDS: [&str; 6] = [
    "name",
    "email",
    "education",
    "motherTongue",
    "caste",
    "religion",
];

/// Run a list query over `clients`, computing ages as of `today`.
pub fn list_clients(clients: &[Client], query: &ClientQuery, today: NaiveDate) -> ClientPage {
    let mut matched: Vec<&Client> = clients
        .iter()
        .filter(|client| matches_search(client, &query.search))
        .collect();

    matched.sort_by(|a, b| compare_clients(a, b, &query.sort_by, query.sort_order));

    let total = matched.len();
    let skip = query.page.saturating_sub(1).saturating_mul(query.page_size);
    let page: Vec<Client> = matched
        .into_iter()
        .skip(skip)
        .take(query.page_size)
        .map(|client| client.clone().with_age(today))
        .collect();

    tracing::debug!(
        search = %query.search,
        sort_by = ?query.sort_by,
        sort_order = %query.sort_order,
        total,
        returned = page.len(),
        "listed clients"
    );

    ClientPage {
        clients: page,
        pagination: PageInfo {
            page: query.page,
            page_size: query.page_size,
            total,
            total_pages: total.div_ceil(query.page_size.max(1)),
        },
    }
}

/// Find a client profile by id.
pub fn find_client<'a>(clients: &'a [Client], id: &str) -> Result<&'a Client> {
    clients
        .iter()
        .find(|client| client.id == id)
        .ok_or_else(|| ProfileDeskError::ClientNotFound(id.to_string()))
}

fn matches_search(client: &Client, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    SEARCH_FIELDS
        .iter()
        .any(|field| client.field(field).contains_lowercase(&needle))
}

fn compare_clients(a: &Client, b: &Client, sort_by: &ClientSort, order: SortOrder) -> Ordering {
    match sort_by {
        ClientSort::Name => directed(a.user.name.cmp(&b.user.name), order),
        // Later birth date means younger, so age order is birth order reversed
        ClientSort::Age => directed(a.date_of_birth.cmp(&b.date_of_birth), order.toggled()),
        ClientSort::CreatedAt => directed(a.user.created_at.cmp(&b.user.created_at), order),
        ClientSort::Field(key) => compare_nulls_last(&a.field(key), &b.field(key), order),
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::client::tests::sample_client;
    use chrono::{DateTime, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn clients() -> Vec<Client> {
        let mut amy = sample_client("1", "Amy", "1995-05-01");
        amy.mother_tongue = Some("Tamil".to_string());
        amy.caste = Some("Iyer".to_string());
        amy.user.created_at = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut bob = sample_client("2", "Bob", "1990-07-10");
        bob.religion = "Christian".to_string();
        bob.education = Some("MBA".to_string());
        bob.user.created_at = DateTime::parse_from_rfc3339("2024-01-15T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut cid = sample_client("3", "Cid", "1998-11-20");
        cid.city = Some("Pune".to_string());
        cid.user.created_at = DateTime::parse_from_rfc3339("2024-06-30T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        vec![amy, bob, cid]
    }

    fn ids(page: &ClientPage) -> Vec<&str> {
        page.clients.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let page = list_clients(&clients(), &ClientQuery::new(), today());
        assert_eq!(ids(&page), ["3", "1", "2"]);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_ages_filled() {
        let page = list_clients(&clients(), &ClientQuery::new(), today());
        let amy = page.clients.iter().find(|c| c.id == "1").unwrap();
        assert_eq!(amy.age, Some(29));
    }

    #[test]
    fn test_age_sort_reverses_birth_date() {
        let query = ClientQuery::new().sort(ClientSort::Age, SortOrder::Ascending);
        let page = list_clients(&clients(), &query, today());
        // Youngest first: Cid (1998), Amy (1995), Bob (1990)
        assert_eq!(ids(&page), ["3", "1", "2"]);

        let query = ClientQuery::new().sort(ClientSort::Age, SortOrder::Descending);
        let page = list_clients(&clients(), &query, today());
        assert_eq!(ids(&page), ["2", "1", "3"]);
    }

    #[test]
    fn test_name_sort() {
        let query = ClientQuery::new().sort(ClientSort::Name, SortOrder::Descending);
        let page = list_clients(&clients(), &query, today());
        assert_eq!(ids(&page), ["3", "2", "1"]);
    }

    #[test]
    fn test_field_sort_nulls_last() {
        let query = ClientQuery::new().sort(
            ClientSort::Field("city".to_string()),
            SortOrder::Descending,
        );
        let page = list_clients(&clients(), &query, today());
        assert_eq!(ids(&page)[0], "3");
    }

    #[test]
    fn test_search_fields() {
        let search = |text: &str| {
            let query = ClientQuery::new().search(text);
            let page = list_clients(&clients(), &query, today());
            let mut found: Vec<String> = page.clients.iter().map(|c| c.id.clone()).collect();
            found.sort();
            found
        };
        assert_eq!(search("tamil"), ["1"]);
        assert_eq!(search("IYER"), ["1"]);
        assert_eq!(search("mba"), ["2"]);
        assert_eq!(search("christian"), ["2"]);
        assert_eq!(search("bob@"), ["2"]);
        assert_eq!(search("hindu"), ["1", "3"]);
        // City is displayed but not searched
        assert!(search("pune").is_empty());
    }

    #[test]
    fn test_pagination_window() {
        let query = ClientQuery::new()
            .sort(ClientSort::Name, SortOrder::Ascending)
            .page(2)
            .page_size(2);
        let page = list_clients(&clients(), &query, today());
        assert_eq!(ids(&page), ["3"]);
        assert_eq!(
            page.pagination,
            PageInfo {
                page: 2,
                page_size: 2,
                total: 3,
                total_pages: 2
            }
        );
    }

    #[test]
    fn test_find_client() {
        let all = clients();
        assert_eq!(find_client(&all, "2").unwrap().user.name, "Bob");
        assert!(matches!(
            find_client(&all, "9"),
            Err(ProfileDeskError::ClientNotFound(id)) if id == "9"
        ));
    }

    #[test]
    fn test_page_info_serializes_camel_case() {
        let info = PageInfo {
            page: 1,
            page_size: 10,
            total: 0,
            total_pages: 0,
        };
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalPages"], 0);
    }
}
