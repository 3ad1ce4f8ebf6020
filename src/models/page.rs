use serde::{Deserialize, Serialize};

use super::validation::digits;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Search and pagination parameters shared by every list endpoint.
/// The Portuguese names are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, alias = "busca")]
    pub q: Option<String>,
    #[serde(default, alias = "pagina")]
    pub page: Option<u32>,
    #[serde(default, alias = "limite")]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }

    fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// `LIKE` pattern for the folded search term, if any. `%`, `_` and `\`
    /// are escaped, so queries must use `ESCAPE '\'`.
    pub fn pattern(&self) -> Option<String> {
        self.term().map(|q| {
            let mut pattern = String::with_capacity(q.len() + 2);
            pattern.push('%');
            for ch in fold(q).chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }

    /// Pattern over bare digits when the term looks like a (partial) CPF,
    /// so `529.982` matches the stored `52998224725`.
    pub fn digits_pattern(&self) -> Option<String> {
        self.term()
            .filter(|q| q.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | ' ')))
            .map(digits)
            .filter(|d| !d.is_empty())
            .map(|d| format!("%{d}%"))
    }
}

/// Unicode lowercase form stored next to searchable names. SQLite's own
/// `LIKE` and `lower()` only fold ASCII.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &ListQuery) -> Self {
        let limit = query.limit();
        let total_pages = (total.max(0) as u64).div_ceil(u64::from(limit)) as u32;
        Self {
            items,
            total,
            page: query.page(),
            limit,
            total_pages,
        }
    }
}
