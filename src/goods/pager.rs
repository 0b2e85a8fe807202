//! Pagination state for the goods grid.
//!
//! [`GoodsPager`] owns the append-only goods list, the continuation
//! cursor, and the identity of the one fetch that may be in flight.
//! Fetches are tagged; a completion is applied only while its tag is
//! still the expected one, so a page that arrives after a theme switch
//! or reload can never leak into the new list.

use crate::api::model::{GoodsData, GoodsPage};

/// Supplies display keys for fetched products.
///
/// Products are keyed for the UI on arrival rather than by any backend
/// id. The trait exists so tests can pin the sequence.
pub trait DisplayKeys: Send {
    fn next_key(&mut self) -> String;
}

/// Monotonic `goods-N` keys, unique for the lifetime of the pager.
#[derive(Debug, Default)]
pub struct SequentialKeys {
    counter: u64,
}

impl DisplayKeys for SequentialKeys {
    fn next_key(&mut self) -> String {
        let key = format!("goods-{}", self.counter);
        self.counter += 1;
        key
    }
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTag {
    pub theme_key: String,
    pub seq: u64,
}

/// A fetch the pager wants performed.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub tag: FetchTag,
    /// Continuation cursor, absent for the first page.
    pub page_token: Option<String>,
}

/// A product ready for display.
#[derive(Debug, Clone)]
pub struct GoodsItem {
    pub key: String,
    pub name: String,
    pub image_url: String,
    pub selling_price: u32,
    pub brand: String,
}

impl GoodsItem {
    fn from_data(data: GoodsData, key: String) -> Self {
        Self {
            key,
            name: data.name,
            image_url: data.image_url,
            selling_price: data.price.selling_price,
            brand: data.brand_info.name,
        }
    }
}

/// Append-only pagination state for one theme's goods.
pub struct GoodsPager {
    theme_key: String,
    items: Vec<GoodsItem>,
    next_page_token: Option<String>,
    seq: u64,
    in_flight: Option<FetchTag>,
    keys: Box<dyn DisplayKeys>,
}

impl Default for GoodsPager {
    fn default() -> Self {
        Self::new()
    }
}

impl GoodsPager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_keys(Box::new(SequentialKeys::default()))
    }

    #[must_use]
    pub fn with_keys(keys: Box<dyn DisplayKeys>) -> Self {
        Self {
            theme_key: String::new(),
            items: Vec::new(),
            next_page_token: None,
            seq: 0,
            in_flight: None,
            keys,
        }
    }

    /// Drop all state and start over on `theme_key`. Returns the fetch
    /// for the first page.
    pub fn reset(&mut self, theme_key: &str) -> FetchRequest {
        self.theme_key = theme_key.to_string();
        self.items.clear();
        self.next_page_token = None;
        self.issue(None)
    }

    /// Request the next page, if there is one and nothing is in flight.
    pub fn request_next_page(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let token = self.next_page_token.clone()?;
        Some(self.issue(Some(token)))
    }

    fn issue(&mut self, page_token: Option<String>) -> FetchRequest {
        self.seq += 1;
        let tag = FetchTag {
            theme_key: self.theme_key.clone(),
            seq: self.seq,
        };
        self.in_flight = Some(tag.clone());
        FetchRequest { tag, page_token }
    }

    /// Apply a completed fetch. Returns false, changing nothing, when
    /// the tag is stale.
    ///
    /// An empty continuation token counts as end of results.
    pub fn apply(&mut self, tag: &FetchTag, page: GoodsPage) -> bool {
        if self.in_flight.as_ref() != Some(tag) {
            return false;
        }
        self.in_flight = None;
        for data in page.products {
            let key = self.keys.next_key();
            self.items.push(GoodsItem::from_data(data, key));
        }
        self.next_page_token = page.next_page_token.filter(|token| !token.is_empty());
        true
    }

    /// Settle a failed fetch so a later one can be issued. Stale tags
    /// change nothing.
    pub fn settle_failure(&mut self, tag: &FetchTag) -> bool {
        if self.in_flight.as_ref() != Some(tag) {
            return false;
        }
        self.in_flight = None;
        true
    }

    #[must_use]
    pub fn items(&self) -> &[GoodsItem] {
        &self.items
    }

    #[must_use]
    pub fn theme_key(&self) -> &str {
        &self.theme_key
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }

    /// Tag of the in-flight fetch, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&FetchTag> {
        self.in_flight.as_ref()
    }
}
