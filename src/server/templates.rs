//! HTML templates for the price page, built with `format!`.

use crate::models::{Category, PageData, Product};
use crate::utils::{format_price, html_escape};

/// Base page wrapper.
fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
    body {{ font-family: sans-serif; margin: 1em auto; max-width: 48em; padding: 0 1em; }}
    h1 {{ font-size: 1.3em; }}
    h2 {{ font-size: 1.1em; border-bottom: 1px solid #ccc; padding-bottom: 0.2em; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ text-align: left; padding: 0.3em 0.6em; border-bottom: 1px solid #eee; }}
    .normalized {{ color: #b30000; }}
    .empty {{ color: #888; }}
</style>
</head>
<body>
<h1>{title}</h1>
{content}
</body>
</html>
"#,
        title = html_escape(title),
        content = content,
    )
}

/// Render the full price page, one section per category.
pub fn price_page(page: &PageData) -> String {
    let mut content = String::new();
    for category in &page.categories {
        content.push_str(&category_section(category));
    }
    base_template("蔬菜价格", &content)
}

fn category_section(category: &Category) -> String {
    if category.products.is_empty() {
        return format!(
            "<h2>{}</h2>\n<p class=\"empty\">暂无商品</p>\n",
            html_escape(&category.name)
        );
    }

    let rows: String = category.products.iter().map(product_row).collect();
    format!(
        r#"<h2>{name}</h2>
<table>
<tr><th>商品</th><th>价格</th><th>规格</th><th>折合</th></tr>
{rows}</table>
"#,
        name = html_escape(&category.name),
        rows = rows,
    )
}

fn product_row(product: &Product) -> String {
    format!(
        "<tr><td>{name}</td><td>{price}元</td><td>{spec}</td>\
         <td class=\"normalized\">{normalized}{unit}</td></tr>\n",
        name = html_escape(&product.name),
        price = format_price(product.price),
        spec = html_escape(&product.spec),
        normalized = format_price(product.price_per_jin),
        unit = html_escape(&product.unit),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> PageData {
        PageData {
            categories: vec![
                Category::new(
                    "leaf-vegetable",
                    "叶菜类",
                    vec![Product {
                        id: "/goods/7.html".to_string(),
                        name: "菠菜 <特价>".to_string(),
                        price: 3.5,
                        spec: "500g".to_string(),
                        price_per_jin: 3.5,
                        is_packaged: false,
                        unit: "元/斤".to_string(),
                    }],
                ),
                Category::new("mushroom", "菌菇类", vec![]),
            ],
        }
    }

    #[test]
    fn test_price_page_escapes_and_rounds() {
        let html = price_page(&sample_page());
        assert!(html.contains("菠菜 &lt;特价&gt;"));
        assert!(!html.contains("<特价>"));
        assert!(html.contains("3.50元"));
        assert!(html.contains("3.50元/斤"));
    }

    #[test]
    fn test_empty_category_renders_placeholder() {
        let html = price_page(&sample_page());
        assert!(html.contains("菌菇类"));
        assert!(html.contains("暂无商品"));
    }
}
