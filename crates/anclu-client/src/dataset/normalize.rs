use serde::Serialize;

pub const NO_BRAND: &str = "NO BRAND";
pub const OTHER_PRODUCT_TYPE: &str = "OTHER";

/// Product types sold as hardware. Everything else is a postpaid line.
pub const EQUIPMENT_PRODUCT_TYPES: [&str; 3] = ["Cash Kit", "Replacement", "Installment Kit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Equipment,
    Postpaid,
}

impl ProductCategory {
    pub const ALL: [Self; 2] = [Self::Equipment, Self::Postpaid];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Postpaid => "postpaid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Equipment => "Equipment",
            Self::Postpaid => "Postpaid",
        }
    }
}

pub fn classify(product_type: &str) -> ProductCategory {
    let key = collapse_whitespace(product_type).to_lowercase();
    let is_equipment = EQUIPMENT_PRODUCT_TYPES
        .iter()
        .any(|candidate| candidate.to_lowercase() == key);
    if is_equipment {
        ProductCategory::Equipment
    } else {
        ProductCategory::Postpaid
    }
}

pub fn normalize_brand(value: Option<&str>) -> String {
    match value.map(collapse_whitespace) {
        Some(brand) if !brand.is_empty() => brand.to_uppercase(),
        _ => NO_BRAND.to_string(),
    }
}

/// Product types keep their casing for display; only surrounding and
/// repeated whitespace is removed. Classification compares case-insensitively.
pub fn normalize_product_type(value: Option<&str>) -> String {
    match value.map(collapse_whitespace) {
        Some(product_type) if !product_type.is_empty() => product_type,
        _ => OTHER_PRODUCT_TYPE.to_string(),
    }
}

pub fn normalize_identifier(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::{
        NO_BRAND, OTHER_PRODUCT_TYPE, ProductCategory, classify, normalize_brand,
        normalize_identifier, normalize_product_type,
    };

    #[test]
    fn brand_is_uppercased_trimmed_and_defaulted() {
        assert_eq!(normalize_brand(Some("  samsung ")), "SAMSUNG");
        assert_eq!(normalize_brand(Some("   ")), NO_BRAND);
        assert_eq!(normalize_brand(None), NO_BRAND);
    }

    #[test]
    fn product_type_keeps_case_and_collapses_spaces() {
        assert_eq!(
            normalize_product_type(Some(" Cash   Kit ")),
            "Cash Kit".to_string()
        );
        assert_eq!(normalize_product_type(Some("")), OTHER_PRODUCT_TYPE);
        assert_eq!(normalize_product_type(None), OTHER_PRODUCT_TYPE);
    }

    #[test]
    fn classification_is_case_insensitive_for_equipment_types() {
        assert_eq!(classify("Cash Kit"), ProductCategory::Equipment);
        assert_eq!(classify("REPLACEMENT"), ProductCategory::Equipment);
        assert_eq!(classify("installment  kit"), ProductCategory::Equipment);
        assert_eq!(classify("Postpaid Plan"), ProductCategory::Postpaid);
        assert_eq!(classify(OTHER_PRODUCT_TYPE), ProductCategory::Postpaid);
    }

    #[test]
    fn classification_is_deterministic() {
        for product_type in ["Cash Kit", "Portability", "", "Replacement", "OTHER"] {
            assert_eq!(classify(product_type), classify(product_type));
        }
    }

    #[test]
    fn blank_identifiers_become_none() {
        assert_eq!(normalize_identifier(Some(" CC01 ")), Some("CC01".to_string()));
        assert_eq!(normalize_identifier(Some("  ")), None);
        assert_eq!(normalize_identifier(None), None);
    }
}
