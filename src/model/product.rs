//! Product input records, supplied wholesale by an external catalog layer.

/// One product as received from the external data layer. Read-only to the
/// engine; every descriptive field is optional.
#[derive(Debug, Clone, Default)]
pub struct ProductRecord {
    pub id: u64,
    pub name: String,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub weight_kg: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub length_cm: Option<f64>,
    pub description: Option<String>,
    /// Location understood by the configured `ImageSource` (path, URL, key)
    pub photo: Option<String>,
}

impl ProductRecord {
    pub fn formatted_price(&self) -> Option<String> {
        self.price.map(|p| format!("R$ {:.2}", p))
    }

    pub fn formatted_stock(&self) -> Option<String> {
        let stock = self.stock?;
        Some(match &self.unit {
            Some(unit) => format!("{} {}", trim_quantity(stock), unit),
            None => trim_quantity(stock),
        })
    }

    /// "L x W x H cm" when all three dimensions are present, partial lists
    /// are omitted entirely.
    pub fn formatted_dimensions(&self) -> Option<String> {
        match (self.length_cm, self.width_cm, self.height_cm) {
            (Some(l), Some(w), Some(h)) => Some(format!(
                "{} x {} x {} cm",
                trim_quantity(l),
                trim_quantity(w),
                trim_quantity(h)
            )),
            _ => None,
        }
    }

    pub fn formatted_weight(&self) -> Option<String> {
        self.weight_kg.map(|w| format!("{} kg", trim_quantity(w)))
    }
}

/// Render a quantity without a spurious trailing ".0" for whole numbers
fn trim_quantity(v: f64) -> String {
    if (v - v.round()).abs() < f64::EPSILON {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.2}", v)
    }
}

/// Viewer capability class. Restricted viewers never see stock quantities,
/// regardless of what a template makes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerClass {
    #[default]
    Full,
    Restricted,
}

impl ViewerClass {
    pub fn can_see_stock(self) -> bool {
        matches!(self, ViewerClass::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_stock_formatting() {
        let product = ProductRecord {
            name: "Martelo".to_string(),
            price: Some(49.9),
            stock: Some(12.0),
            unit: Some("un".to_string()),
            ..Default::default()
        };
        assert_eq!(product.formatted_price().as_deref(), Some("R$ 49.90"));
        assert_eq!(product.formatted_stock().as_deref(), Some("12 un"));
    }

    #[test]
    fn dimensions_require_all_three_axes() {
        let product = ProductRecord {
            width_cm: Some(10.0),
            height_cm: Some(4.5),
            ..Default::default()
        };
        assert_eq!(product.formatted_dimensions(), None);

        let complete = ProductRecord {
            length_cm: Some(20.0),
            ..product
        };
        assert_eq!(
            complete.formatted_dimensions().as_deref(),
            Some("20 x 10 x 4.50 cm")
        );
    }
}
