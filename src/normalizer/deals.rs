// src/normalizer/deals.rs

//! Deal extraction stages.

use serde_json::Value;

use crate::models::{Deal, DealStage, MAX_DEALS};
use crate::utils::url::{get_domain, strip_www};

/// Run a single deal stage against the shopping document.
pub fn extract(stage: DealStage, shopping: &Value) -> Vec<Deal> {
    match stage {
        DealStage::ShoppingOffers => shopping_offers(shopping),
        DealStage::OrganicPrices => organic_prices(shopping),
    }
}

fn shopping_offers(shopping: &Value) -> Vec<Deal> {
    let Some(offers) = shopping
        .pointer("/shopping_results/0/offers")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    offers
        .iter()
        .take(MAX_DEALS)
        .filter(|offer| offer.is_object())
        .map(|offer| Deal {
            source: text(offer.get("seller")),
            price: text(offer.get("price")),
            link: text(offer.get("link")),
        })
        .collect()
}

fn organic_prices(shopping: &Value) -> Vec<Deal> {
    let Some(results) = shopping.get("organic_results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|result| {
            let detected = result.pointer("/rich_snippet/top/detected_extensions/price")?;
            is_truthy(detected).then(|| organic_deal(result, detected))
        })
        .take(MAX_DEALS)
        .collect()
}

fn organic_deal(result: &Value, detected_price: &Value) -> Deal {
    let link = text(result.get("link"));

    let mut source = strip_www(&text(result.get("domain"))).to_string();
    if source.is_empty() {
        source = get_domain(&link)
            .map(|domain| strip_www(&domain).to_string())
            .unwrap_or_default();
    }

    let mut price = text(result.pointer("/rich_snippet/top/extensions/0"));
    if price.is_empty() {
        price = text(Some(detected_price));
    }

    Deal {
        source,
        price,
        link,
    }
}

/// Render a scalar field as text; anything else becomes empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn organic(domain: &str, price: Option<f64>, extension: &str) -> Value {
        let mut top = json!({ "extensions": [extension] });
        if let Some(p) = price {
            top["detected_extensions"] = json!({ "price": p });
        }
        json!({
            "domain": domain,
            "link": format!("https://{domain}/item"),
            "rich_snippet": { "top": top }
        })
    }

    #[test]
    fn test_offers_keep_first_three_in_order() {
        let doc = json!({
            "shopping_results": [{
                "offers": [
                    { "seller": "S1", "price": "£10", "link": "https://s1" },
                    { "seller": "S2", "price": "£11", "link": "https://s2" },
                    { "seller": "S3", "price": "£12", "link": "https://s3" },
                    { "seller": "S4", "price": "£13", "link": "https://s4" }
                ]
            }]
        });

        let deals = extract(DealStage::ShoppingOffers, &doc);
        let sources: Vec<_> = deals.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, ["S1", "S2", "S3"]);
        assert_eq!(deals[2].price, "£12");
    }

    #[test]
    fn test_offers_missing_fields_become_empty() {
        let doc = json!({ "shopping_results": [{ "offers": [{ "seller": "S1", "price": 9.5 }, null] }] });

        let deals = extract(DealStage::ShoppingOffers, &doc);
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].price, "9.5");
        assert_eq!(deals[0].link, "");
    }

    #[test]
    fn test_offers_window_is_first_three_entries() {
        let doc = json!({ "shopping_results": [{ "offers": [
            { "seller": "S1", "price": "£1", "link": "https://s1" },
            null,
            { "seller": "S3", "price": "£3", "link": "https://s3" },
            { "seller": "S4", "price": "£4", "link": "https://s4" }
        ] }] });

        let sellers: Vec<_> = extract(DealStage::ShoppingOffers, &doc)
            .into_iter()
            .map(|deal| deal.source)
            .collect();
        assert_eq!(sellers, vec!["S1", "S3"]);
    }

    #[test]
    fn test_offers_absent_or_null() {
        assert!(extract(DealStage::ShoppingOffers, &json!({})).is_empty());
        assert!(extract(DealStage::ShoppingOffers, &json!({ "shopping_results": null })).is_empty());
        assert!(extract(DealStage::ShoppingOffers, &json!({ "shopping_results": [] })).is_empty());
    }

    #[test]
    fn test_organic_filters_on_detected_price() {
        let doc = json!({
            "organic_results": [
                organic("www.shop-a.co.uk", Some(19.99), "£19.99"),
                organic("www.blog.com", None, "Review"),
                organic("shop-b.com", Some(21.0), "£21.00"),
                organic("www.shop-c.com", Some(0.0), "£0.00"),
            ]
        });

        let deals = extract(DealStage::OrganicPrices, &doc);
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].source, "shop-a.co.uk");
        assert_eq!(deals[0].price, "£19.99");
        assert_eq!(deals[0].link, "https://www.shop-a.co.uk/item");
        assert_eq!(deals[1].source, "shop-b.com");
    }

    #[test]
    fn test_organic_caps_at_three() {
        let results: Vec<Value> = (0..5)
            .map(|i| organic(&format!("www.s{i}.com"), Some(1.0 + i as f64), "£1"))
            .collect();
        let doc = json!({ "organic_results": results });

        assert_eq!(extract(DealStage::OrganicPrices, &doc).len(), MAX_DEALS);
    }

    #[test]
    fn test_organic_falls_back_to_link_host() {
        let doc = json!({
            "organic_results": [{
                "link": "https://www.example.com/p/1",
                "rich_snippet": { "top": { "detected_extensions": { "price": 5 } } }
            }]
        });

        let deals = extract(DealStage::OrganicPrices, &doc);
        assert_eq!(deals[0].source, "example.com");
        assert_eq!(deals[0].price, "5");
    }
}
