use lopdf::Document;

use crate::error::AnalysisError;

const MEDIA: &str = "PDF";

/// Extract text page by page and join the pages with a single newline.
///
/// Pages without a text layer contribute an empty segment, so an `N`-page
/// document always yields `N - 1` separators.
pub fn extract(bytes: &[u8]) -> Result<String, AnalysisError> {
    let doc = Document::load_mem(bytes).map_err(|e| AnalysisError::unreadable(MEDIA, e))?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().into_keys() {
        let text = doc
            .extract_text(&[page_number])
            .map_err(|e| AnalysisError::unreadable(MEDIA, format!("page {}: {}", page_number, e)))?;
        pages.push(trim_page(&text).to_string());
    }

    Ok(pages.join("\n"))
}

/// lopdf terminates every text object with a line break; drop the trailing ones
/// so the page separator stays a single `\n`.
fn trim_page(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}
