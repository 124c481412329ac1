//! Grouping and ordering of products into category blocks.

use crate::config::defaults::UNCATEGORIZED_LABEL;

use super::product::ProductRecord;

/// Products sharing a category, rendered as one contiguous block with its
/// own title.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category_name: String,
    pub products: Vec<ProductRecord>,
}

/// Group products by category, categories ascending by name and products
/// ascending by name within each group.
///
/// Pure and deterministic: equal names keep their original relative order
/// (stable sort, no secondary key). Products without a category land in a
/// synthetic bucket whose display name is a fixed literal, sorted among the
/// named categories like any other name.
pub fn organize(products: Vec<ProductRecord>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for product in products {
        let name = product
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());

        match groups.iter_mut().find(|g| g.category_name == name) {
            Some(group) => group.products.push(product),
            None => groups.push(CategoryGroup {
                category_name: name,
                products: vec![product],
            }),
        }
    }

    groups.sort_by(|a, b| a.category_name.cmp(&b.category_name));
    for group in &mut groups {
        group.products.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: Option<&str>) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            category: category.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn categories_and_products_sorted_ascending() {
        let groups = organize(vec![
            product("Serrote", Some("Ferramentas")),
            product("Adubo", Some("Jardim")),
            product("Alicate", Some("Ferramentas")),
        ]);

        let names: Vec<&str> = groups.iter().map(|g| g.category_name.as_str()).collect();
        assert_eq!(names, vec!["Ferramentas", "Jardim"]);

        let ferramentas: Vec<&str> = groups[0].products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(ferramentas, vec!["Alicate", "Serrote"]);
    }

    #[test]
    fn missing_category_goes_to_synthetic_bucket() {
        let groups = organize(vec![
            product("Item sem categoria", None),
            product("Item com espacos", Some("   ")),
            product("Parafuso", Some("Fixadores")),
        ]);

        let names: Vec<&str> = groups.iter().map(|g| g.category_name.as_str()).collect();
        // "Sem categoria" sorts alphabetically among named categories
        assert_eq!(names, vec!["Fixadores", UNCATEGORIZED_LABEL]);
        assert_eq!(groups[1].products.len(), 2);
    }

    #[test]
    fn equal_names_keep_input_order() {
        let mut first = product("Chave", Some("Ferramentas"));
        first.id = 1;
        let mut second = product("Chave", Some("Ferramentas"));
        second.id = 2;

        let groups = organize(vec![first, second]);
        let ids: Vec<u64> = groups[0].products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
