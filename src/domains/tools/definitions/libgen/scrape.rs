//! HTML extraction for Libgen pages.

use scraper::{Html, Selector};

const EDITION_MARKER: &str = "edition.php?id=";

/// Edition ids from a detailed search page, in page order, at most `count`.
///
/// Rows come from `table#tablelibgen`, skipping the header row; each row
/// contributes the id of its first edition link.
pub fn edition_ids(html: &str, count: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(row_sel) = Selector::parse("table#tablelibgen tr") else {
        return Vec::new();
    };
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for row in document.select(&row_sel).skip(1) {
        let edition = row
            .select(&anchor_sel)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(EDITION_MARKER));

        if let Some(href) = edition {
            if let Some(id) = href.rsplit('=').next().filter(|id| !id.is_empty()) {
                ids.push(id.to_string());
            }
        }
        if ids.len() >= count {
            break;
        }
    }
    ids
}

/// The relative `get.php?md5=` link on an `ads.php` page.
pub fn download_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"a[href^="get.php?md5="]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
