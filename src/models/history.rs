use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past prompt/response exchange as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_record_id")]
    pub id: String,
    pub prompt: String,
    pub response: String,
    #[serde(
        alias = "createdAt",
        deserialize_with = "crate::parsers::deserializers::deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
}

/// Pagination block of the history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
}

/// Raw body of `GET /history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub chats: Vec<ChatRecord>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl HistoryPage {
    /// Total page count reported by the server; missing or zero counts as one page.
    pub fn total_pages(&self) -> u32 {
        self.pagination.as_ref().and_then(|p| p.total_pages).filter(|&n| n > 0).unwrap_or(1)
    }
}

/// The page currently shown by a history viewer, newest record first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<ChatRecord>,
    pub page_number: u32,
    pub total_pages: u32,
}

impl Page {
    pub fn from_response(page_number: u32, response: HistoryPage) -> Self {
        let total_pages = response.total_pages();
        Self { items: response.chats, page_number, total_pages }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ChatRecord> {
        self.items.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_page_parses_numeric_ids_and_snake_case_timestamp() {
        let json = r#"{
            "chats": [{
                "id": 1,
                "prompt": "Hotels in Byblos?",
                "response": "Try the old souk area.",
                "created_at": "2025-11-02T09:41:20.016Z"
            }],
            "pagination": { "totalPages": 2 }
        }"#;

        let page: HistoryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.chats.len(), 1);
        assert_eq!(page.chats[0].id, "1");
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_history_page_accepts_camel_case_timestamp() {
        let json = r#"{
            "chats": [{
                "id": "abc",
                "prompt": "p",
                "response": "r",
                "createdAt": 1762076480016
            }]
        }"#;

        let page: HistoryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.chats[0].id, "abc");
        assert_eq!(
            page.chats[0].created_at,
            DateTime::from_timestamp_millis(1762076480016).unwrap()
        );
    }

    #[test]
    fn test_missing_pagination_defaults_to_one_page() {
        let page: HistoryPage = serde_json::from_str(r#"{"chats": []}"#).unwrap();
        assert_eq!(page.total_pages(), 1);

        let page: HistoryPage =
            serde_json::from_str(r#"{"chats": [], "pagination": {"totalPages": 0}}"#).unwrap();
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_missing_chats_defaults_to_empty() {
        let page: HistoryPage = serde_json::from_str("{}").unwrap();
        assert!(page.chats.is_empty());
    }

    #[test]
    fn test_page_from_response() {
        let response: HistoryPage =
            serde_json::from_str(r#"{"chats": [], "pagination": {"totalPages": 4}}"#).unwrap();
        let page = Page::from_response(3, response);

        assert_eq!(page.page_number, 3);
        assert_eq!(page.total_pages, 4);
        assert!(page.is_empty());
    }
}
