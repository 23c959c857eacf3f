use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Rupee amounts such as `₹10,000` or `₹ 50,000`.
    static ref RUPEE_AMOUNT: Regex = Regex::new(r"₹\s?\d+[,\d]*").unwrap();
}

/// All rupee amounts in `text`, as written. Matching runs on the original text.
pub fn rupee_amounts(text: &str) -> Vec<&str> {
    RUPEE_AMOUNT.find_iter(text).map(|m| m.as_str()).collect()
}
