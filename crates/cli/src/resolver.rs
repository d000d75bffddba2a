//! Demo keyword resolver.
//!
//! Stands in for a real language-model translation layer: known question
//! shapes map to canned SQL templates, everything else resolves to nothing.
//! The pipeline treats this as an opaque collaborator behind
//! [`QueryResolver`], so swapping in a real resolver touches nothing else.

use pipeline::QueryResolver;

const PRODUCT_TREND_SQL: &str = "SELECT strftime('%Y-%m', date) AS month, SUM(revenue) AS total_revenue \
     FROM sales JOIN products ON sales.product_id = products.product_id \
     WHERE products.product_name = '{product}' \
     GROUP BY month ORDER BY month ASC";

const REVENUE_BY_PRODUCT_SQL: &str = "SELECT products.product_name AS product, SUM(sales.revenue) AS total_revenue \
     FROM sales JOIN products ON sales.product_id = products.product_id \
     GROUP BY products.product_name ORDER BY total_revenue DESC";

pub struct KeywordResolver;

impl QueryResolver for KeywordResolver {
    fn resolve(&self, question: &str) -> Option<String> {
        let lowered = question.to_lowercase();

        if lowered.contains("trend") || lowered.contains("over time") {
            let product = detect_product(&lowered).unwrap_or("Product A");
            return Some(PRODUCT_TREND_SQL.replace("{product}", product));
        }

        if lowered.contains("revenue") || lowered.contains("compare") || lowered.contains("sales")
        {
            return Some(REVENUE_BY_PRODUCT_SQL.to_string());
        }

        None
    }
}

fn detect_product(lowered: &str) -> Option<&'static str> {
    ["Product A", "Product B", "Product C"]
        .into_iter()
        .find(|name| lowered.contains(&name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_questions_pick_the_named_product() {
        let sql = KeywordResolver
            .resolve("Show me the 6-month sales trend for Product B")
            .unwrap();
        assert!(sql.contains("'Product B'"));
        assert!(sql.trim_start().to_lowercase().starts_with("select"));
    }

    #[test]
    fn trend_defaults_to_product_a() {
        let sql = KeywordResolver.resolve("show the trend").unwrap();
        assert!(sql.contains("'Product A'"));
    }

    #[test]
    fn comparison_questions_group_by_product() {
        let sql = KeywordResolver
            .resolve("compare revenue across products")
            .unwrap();
        assert!(sql.contains("GROUP BY products.product_name"));
    }

    #[test]
    fn unknown_questions_resolve_to_nothing() {
        assert!(KeywordResolver.resolve("what is the weather").is_none());
    }
}
