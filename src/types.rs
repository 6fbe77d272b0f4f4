//! Common types and data structures

/// One character entry from the listing API
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub image: String,
}

/// Pagination metadata in a listing response
#[derive(Debug, serde::Deserialize)]
pub struct PageInfo {
    pub pages: u32,
}

/// One page of the listing endpoint: `GET /character?page=<n>`
#[derive(Debug, serde::Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

/// What a completed page fetch produced
#[derive(Debug)]
pub enum FetchOutcome {
    Page(CharacterPage),
    NotFound,
    Failed(String),
}

/// A completed fetch handed from the runtime back to the UI thread.
/// `token` identifies the dispatch; stale tokens are dropped on apply.
#[derive(Debug)]
pub struct FetchResult {
    pub token: u64,
    pub page: u32,
    pub outcome: FetchOutcome,
}

/// List view display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded,
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_response() {
        let body = r#"{
            "info": { "count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null },
            "results": [
                { "id": 1, "name": "Rick Sanchez", "status": "Alive",
                  "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg" },
                { "id": 2, "name": "Morty Smith", "status": "Alive",
                  "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg" }
            ]
        }"#;

        let page: CharacterPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.info.pages, 42);
        assert_eq!(page.results.len(), 2);
        assert_eq!(
            page.results[0],
            Character {
                id: 1,
                name: "Rick Sanchez".into(),
                image: "https://rickandmortyapi.com/api/character/avatar/1.jpeg".into(),
            }
        );
    }

    #[test]
    fn parses_empty_result_list() {
        let body = r#"{ "info": { "pages": 42 }, "results": [] }"#;
        let page: CharacterPage = serde_json::from_str(body).unwrap();
        assert!(page.results.is_empty());
    }
}
