//! Rule-based extraction primitives for Brazilian payslips.

pub mod amounts;
pub mod fields;
pub mod line_items;
pub mod normalize;
pub mod patterns;

pub use amounts::{format_brl_amount, parse_brl_amount, AmountScanner, ScannedAmount};
pub use fields::{locate_monetary, locate_period, FieldSpec, Located};
pub use line_items::{classify_line_item, extract_line_items, ExtractedLineItems, LineItemKind};
pub use normalize::{fold_for_match, normalize, normalize_with};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
