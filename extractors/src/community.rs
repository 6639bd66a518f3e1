use crate::csv_table::{CsvRecord, CsvTableParser};
use shared_types::CommunityPost;

pub const URL_COLUMN: &str = "instagram post url";
pub const FALLBACK_URL_COLUMN: &str = "url";
pub const TITLE_COLUMN: &str = "title";
pub const NOTES_COLUMN: &str = "notes / why are you sharing this?";
pub const TAG_COLUMN: &str = "category / tag";
pub const STATUS_COLUMN: &str = "status";

/// Turns the community submission sheet export into posts
pub struct CommunityExtractor {
    csv_parser: CsvTableParser,
}

impl Default for CommunityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityExtractor {
    pub fn new() -> Self {
        Self {
            csv_parser: CsvTableParser::new(),
        }
    }

    /// Every data row mapped to a post, approved or not
    pub fn extract_all(&self, content: &str) -> Vec<CommunityPost> {
        let table = self.csv_parser.parse_table(content);
        table.records().map(post_from_record).collect()
    }

    /// Approved posts that carry a link
    pub fn extract_published(&self, content: &str) -> Vec<CommunityPost> {
        self.extract_all(content)
            .into_iter()
            .filter(CommunityPost::is_publishable)
            .collect()
    }
}

fn post_from_record(record: CsvRecord<'_>) -> CommunityPost {
    let url = match record.get(URL_COLUMN) {
        "" => record.get(FALLBACK_URL_COLUMN),
        url => url,
    };

    CommunityPost {
        url: url.to_string(),
        title: record.get(TITLE_COLUMN).to_string(),
        notes: record.get(NOTES_COLUMN).to_string(),
        tag: record.get(TAG_COLUMN).to_string(),
        status: record.get(STATUS_COLUMN).to_string(),
    }
}
