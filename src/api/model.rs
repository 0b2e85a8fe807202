//! Wire types for the storefront API.

use serde::Deserialize;

/// A gift theme as returned by `/api/v1/themes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    pub key: String,
    pub label: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub background_color: String,
}

/// One product in a theme.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsData {
    pub name: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub price: GoodsPrice,
    pub brand_info: BrandInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsPrice {
    pub selling_price: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandInfo {
    pub name: String,
}

/// One page of products with an optional continuation cursor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsPage {
    pub products: Vec<GoodsData>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response envelope for the theme list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeList {
    pub themes: Vec<ThemeData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_products_page() {
        let page: GoodsPage = serde_json::from_str(
            r#"{
                "products": [
                    {
                        "id": 123,
                        "name": "허니버터칩",
                        "imageURL": "https://img.example.com/123.jpg",
                        "price": { "sellingPrice": 1500 },
                        "brandInfo": { "name": "해태" }
                    }
                ],
                "nextPageToken": "abc"
            }"#,
        )
        .unwrap();

        assert_eq!(page.products.len(), 1);
        let product = &page.products[0];
        assert_eq!(product.name, "허니버터칩");
        assert_eq!(product.image_url, "https://img.example.com/123.jpg");
        assert_eq!(product.price.selling_price, 1500);
        assert_eq!(product.brand_info.name, "해태");
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn missing_and_null_tokens_decode_to_none() {
        let missing: GoodsPage = serde_json::from_str(r#"{ "products": [] }"#).unwrap();
        assert!(missing.next_page_token.is_none());

        let null: GoodsPage =
            serde_json::from_str(r#"{ "products": [], "nextPageToken": null }"#).unwrap();
        assert!(null.next_page_token.is_none());
    }

    #[test]
    fn decodes_a_theme() {
        let theme: ThemeData = serde_json::from_str(
            r##"{
                "id": 7,
                "key": "birthday",
                "label": "생일",
                "title": "생일 선물 추천",
                "backgroundColor": "#fee500"
            }"##,
        )
        .unwrap();

        assert_eq!(theme.key, "birthday");
        assert_eq!(theme.label, "생일");
        assert!(theme.description.is_none());
        assert_eq!(theme.background_color, "#fee500");
    }
}
