//! Category structured data.

use theme_catalog::CategorySnapshot;

use crate::html::strip_tags;
use crate::jsonld::{json_ld_script, BreadcrumbList, CollectionPage, ListItem, SCHEMA_CONTEXT};

/// Build the `CollectionPage` document for a category.
pub fn category_document(category: &CategorySnapshot) -> CollectionPage {
    let items: Vec<ListItem> = category
        .breadcrumbs()
        .into_iter()
        .enumerate()
        .map(|(index, link)| ListItem {
            kind: "ListItem".to_string(),
            position: index + 1,
            name: link.name.clone(),
            item: link.url.clone(),
        })
        .collect();

    let breadcrumb = (!items.is_empty()).then(|| BreadcrumbList {
        kind: "BreadcrumbList".to_string(),
        item_list_element: items,
    });

    CollectionPage {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "CollectionPage".to_string(),
        name: category.name.clone(),
        description: strip_tags(category.description.as_deref().unwrap_or_default()),
        url: category.url.clone(),
        breadcrumb,
    }
}

/// Render the JSON-LD block for the current category.
///
/// Returns an empty string when there is no current category.
pub fn render_category_structured_data(category: Option<&CategorySnapshot>) -> String {
    category
        .map(|category| json_ld_script(&category_document(category)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use theme_catalog::CategoryLink;

    #[test]
    fn test_absent_category_renders_nothing() {
        assert_eq!(render_category_structured_data(None), "");
    }

    #[test]
    fn test_description_stripped_and_defaulted() {
        let category = CategorySnapshot::new("5", "Apparel", "https://shop.test/apparel.html")
            .with_description("<p>All <b>apparel</b></p>");
        assert_eq!(category_document(&category).description, "All apparel");

        let bare = CategorySnapshot::new("5", "Apparel", "https://shop.test/apparel.html");
        assert_eq!(category_document(&bare).description, "");
    }

    #[test]
    fn test_no_breadcrumb_without_resolved_ancestors() {
        let category = CategorySnapshot::new("5", "Apparel", "https://shop.test/apparel.html")
            .with_path("1/5");
        let doc = category_document(&category);
        assert!(doc.breadcrumb.is_none());

        let html = render_category_structured_data(Some(&category));
        assert!(!html.contains("breadcrumb"));
    }

    #[test]
    fn test_breadcrumb_positions_have_no_gaps() {
        let category = CategorySnapshot::new("9", "Tees", "https://shop.test/tees.html")
            .with_path("1/2/3/7/9")
            .with_ancestor("2", CategoryLink::new("Root", None))
            .with_ancestor("7", CategoryLink::new("Men", Some("https://shop.test/men.html")))
            .with_ancestor("9", CategoryLink::new("Tees", Some("https://shop.test/tees.html")));

        let breadcrumb = category_document(&category).breadcrumb.unwrap();
        let positions: Vec<usize> = breadcrumb.item_list_element.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(breadcrumb.item_list_element[0].item, None);
        assert_eq!(
            breadcrumb.item_list_element[1].item.as_deref(),
            Some("https://shop.test/men.html")
        );
    }

    #[test]
    fn test_null_item_is_serialized() {
        let category = CategorySnapshot::new("2", "Root", "https://shop.test/")
            .with_path("2")
            .with_ancestor("2", CategoryLink::new("Root", None));
        let html = render_category_structured_data(Some(&category));
        assert!(html.contains(r#""item": null"#));
    }
}
