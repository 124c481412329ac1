//! Visual template model: positioned content elements authored on a
//! reference canvas, plus per-card styling.

use std::collections::HashMap;

use serde::Deserialize;

/// Font weight for a text run or element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Horizontal text alignment inside an element rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// What an element draws: a text field or a product photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Text,
    Image,
}

/// Product field an element is bound to.
///
/// Resolved once from the element id at template load, so rendering never
/// re-derives the binding from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBinding {
    Name,
    Code,
    Price,
    Stock,
    Brand,
    Weight,
    Dimensions,
    Description,
    Photo,
}

impl ContentBinding {
    /// Map an element id to its binding. Ids are identities, not display
    /// labels; unknown ids yield `None` and the element is skipped.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "name" => Some(Self::Name),
            "code" => Some(Self::Code),
            "price" => Some(Self::Price),
            "stock" => Some(Self::Stock),
            "brand" => Some(Self::Brand),
            "weight" => Some(Self::Weight),
            "dimensions" => Some(Self::Dimensions),
            "description" => Some(Self::Description),
            "photo" => Some(Self::Photo),
            _ => None,
        }
    }
}

/// One positioned, styled content unit inside a card template.
///
/// Positions and sizes are authored in the template's reference-canvas
/// coordinate space and rescaled per card at render time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub id: String,
    pub content_kind: ContentKind,
    pub ref_x: f32,
    pub ref_y: f32,
    pub ref_w: f32,
    pub ref_h: f32,
    pub font_size: f32,
    pub weight: FontWeight,
    pub color: String,
    pub background_color: Option<String>,
    pub border_width: f32,
    pub border_color: String,
    pub border_radius: f32,
    pub padding: f32,
    pub text_align: HAlign,
    pub opacity: f32,
    pub rotation: f32,
    pub z_index: i32,
    pub visible: bool,
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self {
            id: String::new(),
            content_kind: ContentKind::Text,
            ref_x: 0.0,
            ref_y: 0.0,
            ref_w: 50.0,
            ref_h: 12.0,
            font_size: 9.0,
            weight: FontWeight::Normal,
            color: "#000000".to_string(),
            background_color: None,
            border_width: 0.0,
            border_color: "#000000".to_string(),
            border_radius: 0.0,
            padding: 0.0,
            text_align: HAlign::Left,
            opacity: 1.0,
            rotation: 0.0,
            z_index: 0,
            visible: true,
        }
    }
}

impl ElementSpec {
    pub fn binding(&self) -> Option<ContentBinding> {
        ContentBinding::from_id(&self.id)
    }
}

/// A user-authored card design: elements on a reference canvas plus
/// card-level background and border styling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutTemplate {
    pub elements: Vec<ElementSpec>,
    pub ref_card_width: f32,
    pub ref_card_height: f32,
    pub card_background_color: String,
    pub card_border_color: String,
    pub card_border_width: f32,
}

impl Default for LayoutTemplate {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            ref_card_width: 300.0,
            ref_card_height: 200.0,
            card_background_color: "#FFFFFF".to_string(),
            card_border_color: "#CCCCCC".to_string(),
            card_border_width: 0.3,
        }
    }
}

impl LayoutTemplate {
    /// Visible elements in draw order (ascending z-index, stable for ties).
    pub fn draw_order(&self) -> Vec<&ElementSpec> {
        let mut elems: Vec<&ElementSpec> = self.elements.iter().filter(|e| e.visible).collect();
        elems.sort_by_key(|e| e.z_index);
        elems
    }
}

/// Registry used in multi-template mode: templates by id plus a
/// category-name to template-id assignment map.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, LayoutTemplate>,
    assignments: HashMap<String, String>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, template: LayoutTemplate) {
        self.templates.insert(id.into(), template);
    }

    pub fn assign(&mut self, category: impl Into<String>, template_id: impl Into<String>) {
        self.assignments.insert(category.into(), template_id.into());
    }

    /// Template for a category, if one is both assigned and registered.
    pub fn for_category(&self, category: &str) -> Option<&LayoutTemplate> {
        let id = self.assignments.get(category)?;
        self.templates.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_order_sorts_by_z_index_and_skips_hidden() {
        let template = LayoutTemplate {
            elements: vec![
                ElementSpec {
                    id: "price".to_string(),
                    z_index: 5,
                    ..Default::default()
                },
                ElementSpec {
                    id: "name".to_string(),
                    z_index: 1,
                    ..Default::default()
                },
                ElementSpec {
                    id: "code".to_string(),
                    z_index: 3,
                    visible: false,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let order: Vec<&str> = template.draw_order().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec!["name", "price"]);
    }

    #[test]
    fn binding_resolves_from_identity_not_label() {
        assert_eq!(ContentBinding::from_id("price"), Some(ContentBinding::Price));
        assert_eq!(ContentBinding::from_id("Preço"), None);
    }

    #[test]
    fn registry_returns_none_for_unassigned_category() {
        let mut registry = TemplateRegistry::new();
        registry.register("compact", LayoutTemplate::default());
        registry.assign("Ferramentas", "compact");

        assert!(registry.for_category("Ferramentas").is_some());
        assert!(registry.for_category("Jardim").is_none());
    }
}
