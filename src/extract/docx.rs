use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::AnalysisError;

const MEDIA: &str = "Word";
const MAIN_PART: &str = "word/document.xml";

/// Extract the body paragraphs of a `.docx` package, joined with `\n`.
pub fn extract(bytes: &[u8]) -> Result<String, AnalysisError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| AnalysisError::unreadable(MEDIA, e))?;

    let mut xml = String::new();
    archive
        .by_name(MAIN_PART)
        .map_err(|e| AnalysisError::unreadable(MEDIA, format!("{}: {}", MAIN_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| AnalysisError::unreadable(MEDIA, format!("{}: {}", MAIN_PART, e)))?;

    Ok(body_paragraphs(&xml)?.join("\n"))
}

/// Collect the text of every top-level body paragraph (`w:p`).
///
/// Paragraphs inside tables and content controls (`w:sdt`) are skipped, as
/// are paragraphs nested in text boxes of another paragraph. Within a paragraph, `w:t` runs are
/// concatenated, `w:tab` becomes a tab and `w:br` / `w:cr` a line break.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, AnalysisError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut container_depth = 0usize;
    let mut para_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| AnalysisError::unreadable(MEDIA, e))?;

        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"tbl" | b"sdt" => container_depth += 1,
                b"p" => {
                    para_depth += 1;
                    if para_depth == 1 {
                        current.clear();
                    }
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"tbl" | b"sdt" => container_depth = container_depth.saturating_sub(1),
                b"p" => {
                    if para_depth == 1 && container_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    para_depth = para_depth.saturating_sub(1);
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(ref e) => {
                // tab stops in paragraph properties are also `w:tab`
                let collecting = para_depth == 1 && container_depth == 0 && run_depth > 0;
                match e.local_name().as_ref() {
                    b"p" if para_depth == 0 && container_depth == 0 => paragraphs.push(String::new()),
                    b"tab" if collecting => current.push('\t'),
                    b"br" | b"cr" if collecting => current.push('\n'),
                    _ => {}
                }
            }
            Event::Text(ref t) if in_text && para_depth == 1 && container_depth == 0 => {
                let text = t
                    .unescape()
                    .map_err(|e| AnalysisError::unreadable(MEDIA, e))?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file(MAIN_PART, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_joined_in_order() {
        let xml = wrap(
            "<w:p><w:r><w:t>Either party may </w:t></w:r><w:r><w:t>terminate.</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t>Penalty: &#8377;5,000</w:t></w:r></w:p>",
        );
        let text = extract(&build_docx(&xml)).unwrap();
        assert_eq!(text, "Either party may terminate.\n\nPenalty: ₹5,000");
    }

    #[test]
    fn test_tables_are_skipped() {
        let xml = wrap(
            "<w:p><w:r><w:t>Before</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>After</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Before", "After"]);
    }

    #[test]
    fn test_content_controls_are_skipped() {
        let xml = wrap(
            "<w:p><w:r><w:t>Preamble</w:t></w:r></w:p>\
             <w:sdt><w:sdtPr><w:alias w:val=\"Party\"/></w:sdtPr><w:sdtContent>\
             <w:p><w:r><w:t>Placeholder</w:t></w:r></w:p><w:p/>\
             </w:sdtContent></w:sdt>\
             <w:p><w:r><w:t>Terms</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Preamble", "Terms"]);
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = wrap("<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>");
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["A\tB\nC"]);
    }

    #[test]
    fn test_tab_stops_are_not_text() {
        let xml = wrap(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>Clause 1</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Clause 1"]);
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = wrap("<w:p><w:r><w:t>Smith &amp; Sons</w:t></w:r></w:p>");
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Smith & Sons"]);
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract(b"PK but not really").unwrap_err();
        assert!(matches!(err, AnalysisError::UnreadableDocument { media: "Word", .. }));
    }

    #[test]
    fn test_missing_main_part() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(err.to_string().contains(MAIN_PART));
    }
}
