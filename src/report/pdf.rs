use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::error::AnalysisError;
use crate::models::{Assessment, RiskLevel};
use crate::report::{score_line, MITIGATIONS, REPORT_TITLE};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;
const HEADER_H: f32 = 46.0; // gradient band on the first page of each contract
const FOOTER_Y: f32 = 22.0;
const BOTTOM: f32 = 30.0; // content never goes below this

type Rgbf = (f32, f32, f32);

const BG:           Rgbf = (1.00, 1.00, 1.00);
const PANEL_ALT:    Rgbf = (0.95, 0.96, 0.99);
const PANEL_BORDER: Rgbf = (0.85, 0.87, 0.92);
const ACCENT_BLU:   Rgbf = (0.20, 0.46, 0.95);
const ACCENT_PUR:   Rgbf = (0.52, 0.30, 0.95);
const TEXT_PRI:     Rgbf = (0.07, 0.08, 0.14);
const TEXT_SEC:     Rgbf = (0.36, 0.40, 0.52);
const TEXT_MUT:     Rgbf = (0.58, 0.63, 0.72);
const WHITE:        Rgbf = (1.00, 1.00, 1.00);
const WHITE_DIM:    Rgbf = (0.82, 0.89, 1.00);

const LOW_BG:  Rgbf = (0.90, 0.98, 0.92);
const LOW_FG:  Rgbf = (0.07, 0.52, 0.22);
const MED_BG:  Rgbf = (1.00, 0.95, 0.87);
const MED_FG:  Rgbf = (0.70, 0.40, 0.02);
const HIGH_BG: Rgbf = (1.00, 0.91, 0.91);
const HIGH_FG: Rgbf = (0.76, 0.09, 0.13);

const R_PANEL: f32 = 2.5;
const R_BADGE: f32 = 1.5;

const BODY_SIZE: f32 = 9.5;
const BODY_LINE_H: f32 = 5.0;
const BODY_WRAP: usize = 95;

// ── Public entry points ───────────────────────────────────────────────────────

/// Render every assessment into one PDF and write it to `output_path`.
pub fn render(assessments: &[Assessment], output_path: &Path) -> Result<()> {
    let bytes = render_to_bytes(assessments)?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

/// Render every assessment into PDF bytes, one section per contract.
pub fn render_to_bytes(assessments: &[Assessment]) -> Result<Vec<u8>, AnalysisError> {
    let doc = PdfDocument::empty(REPORT_TITLE);
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    for assessment in assessments {
        render_assessment(&doc, &fonts, assessment);
    }

    Ok(doc.save_to_bytes()?)
}

// ── Page flow ─────────────────────────────────────────────────────────────────

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Top-to-bottom writer that starts a continuation page when content runs
/// into the footer.
struct PageFlow<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    layer: PdfLayerReference,
    y: f32,
    page: u32,
    file_name: &'a str,
}

impl<'a> PageFlow<'a> {
    fn begin(doc: &'a PdfDocumentReference, fonts: &'a Fonts, file_name: &'a str) -> Self {
        let layer = blank_page(doc, fonts, "Assessment");

        let hdr_bot = PAGE_H - HEADER_H;
        fill_gradient_h(&layer, 0.0, hdr_bot, PAGE_W, HEADER_H, ACCENT_BLU, ACCENT_PUR, 28);

        set_color(&layer, WHITE_DIM);
        layer.use_text(
            format!("contract-riskr v{}", env!("CARGO_PKG_VERSION")),
            7.5, Mm(PAGE_W - MARGIN - 30.0), Mm(PAGE_H - 10.5), &fonts.regular,
        );
        set_color(&layer, WHITE);
        layer.use_text("Contract Risk Assessment", 24.0, Mm(MARGIN), Mm(PAGE_H - 24.0), &fonts.bold);
        set_color(&layer, WHITE_DIM);
        layer.use_text("Report", 24.0, Mm(MARGIN), Mm(PAGE_H - 36.0), &fonts.bold);

        set_color(&layer, TEXT_MUT);
        layer.use_text("CONTRACT", 6.5, Mm(MARGIN), Mm(hdr_bot - 8.0), &fonts.bold);
        set_color(&layer, TEXT_PRI);
        layer.use_text(truncate(file_name, 60), 10.0, Mm(MARGIN), Mm(hdr_bot - 13.5), &fonts.bold);
        set_color(&layer, TEXT_SEC);
        layer.use_text(
            format!("Assessed  {}", Local::now().format("%Y-%m-%d %H:%M")),
            8.5, Mm(PAGE_W - MARGIN - 45.0), Mm(hdr_bot - 13.5), &fonts.regular,
        );
        draw_hline(&layer, MARGIN, PAGE_W - MARGIN, hdr_bot - 18.0, PANEL_BORDER);

        PageFlow {
            doc,
            fonts,
            layer,
            y: hdr_bot - 26.0,
            page: 1,
            file_name,
        }
    }

    fn next_page(&mut self) {
        self.page += 1;
        let layer = blank_page(self.doc, self.fonts, "Continued");
        fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_BLU, ACCENT_PUR, 21);

        set_color(&layer, TEXT_PRI);
        layer.use_text(
            format!("{} (continued)", truncate(self.file_name, 50)),
            12.0, Mm(MARGIN), Mm(282.5), &self.fonts.bold,
        );
        set_color(&layer, TEXT_MUT);
        layer.use_text(
            format!("Page {}", self.page),
            8.0, Mm(PAGE_W - MARGIN - 14.0), Mm(283.0), &self.fonts.regular,
        );
        draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 277.5, PANEL_BORDER);

        self.layer = layer;
        self.y = 268.0;
    }

    /// Make sure `height` mm fit above the footer.
    fn reserve(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            self.next_page();
        }
    }

    fn section(&mut self, title: &str) {
        // keep the heading together with at least one line of content
        self.reserve(12.0 + BODY_LINE_H);
        set_color(&self.layer, TEXT_PRI);
        self.layer.use_text(title, 12.0, Mm(MARGIN), Mm(self.y), &self.fonts.bold);
        self.y -= 8.0;
    }

    fn paragraph(&mut self, text: &str, indent: f32, color: Rgbf) {
        for line in wrap_text(text, BODY_WRAP - (indent / 2.0) as usize) {
            self.reserve(BODY_LINE_H);
            set_color(&self.layer, color);
            self.layer.use_text(line, BODY_SIZE, Mm(MARGIN + indent), Mm(self.y), &self.fonts.regular);
            self.y -= BODY_LINE_H;
        }
    }

    fn bullet(&mut self, text: &str, marker: Rgbf) {
        self.reserve(BODY_LINE_H);
        fill_rounded_rect(&self.layer, MARGIN + 1.5, self.y + 0.6, 1.8, 1.8, 0.9, marker);
        self.paragraph(text, 6.0, TEXT_PRI);
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }
}

fn render_assessment(doc: &PdfDocumentReference, fonts: &Fonts, a: &Assessment) {
    let mut flow = PageFlow::begin(doc, fonts, &a.file_name);
    let (level_bg, level_fg) = level_colors(a.level);

    // ── Score panel ───────────────────────────────────────────────────────────
    let panel_h = 24.0;
    flow.reserve(panel_h);
    let panel_y = flow.y - panel_h + 6.0;
    fill_rounded_rect(&flow.layer, MARGIN, panel_y, CONTENT_W, panel_h, R_PANEL, PANEL_ALT);
    stroke_rounded_rect(&flow.layer, MARGIN, panel_y, CONTENT_W, panel_h, R_PANEL, PANEL_BORDER);
    fill_rect(&flow.layer, MARGIN, panel_y, 2.5, panel_h, level_fg);

    set_color(&flow.layer, TEXT_PRI);
    flow.layer.use_text(score_line(a.score), 13.0, Mm(MARGIN + 6.0), Mm(panel_y + 14.5), &fonts.bold);

    let badge_w = 34.0;
    let badge_x = PAGE_W - MARGIN - badge_w - 5.0;
    fill_rounded_rect(&flow.layer, badge_x, panel_y + 13.0, badge_w, 6.5, R_BADGE, level_bg);
    set_color(&flow.layer, level_fg);
    flow.layer.use_text(a.level.badge(), 8.0, Mm(badge_x + 5.0), Mm(panel_y + 14.8), &fonts.bold);

    draw_meter(&flow.layer, MARGIN + 6.0, panel_y + 5.0, CONTENT_W - 12.0, 3.0, a.score, level_fg);
    flow.y = panel_y - 10.0;

    // ── Summary ───────────────────────────────────────────────────────────────
    flow.section("Summary");
    flow.paragraph(&a.summary, 0.0, TEXT_SEC);
    flow.gap(5.0);

    // ── Key risks (input order, duplicates kept) ──────────────────────────────
    flow.section("Key Risks");
    if a.risks.is_empty() {
        flow.paragraph("No key risks detected.", 0.0, TEXT_SEC);
    }
    for risk in &a.risks {
        flow.bullet(risk, level_fg);
    }
    flow.gap(5.0);

    // ── Clause insights ───────────────────────────────────────────────────────
    if !a.clauses.is_empty() {
        flow.section("Clause Insights");
        for (name, finding) in a.clauses.iter() {
            flow.reserve(15.0);
            set_color(&flow.layer, TEXT_PRI);
            flow.layer.use_text(name, 9.5, Mm(MARGIN), Mm(flow.y), &fonts.bold);
            set_color(&flow.layer, TEXT_SEC);
            flow.layer.use_text(&finding.description, 8.5, Mm(MARGIN), Mm(flow.y - 4.5), &fonts.regular);

            let meter_x = MARGIN + 110.0;
            let fg = if finding.severity > 20 { HIGH_FG } else { MED_FG };
            draw_meter(&flow.layer, meter_x, flow.y - 4.0, 50.0, 2.5, finding.severity, fg);
            set_color(&flow.layer, TEXT_MUT);
            flow.layer.use_text(
                format!("{}/100", finding.severity),
                7.5, Mm(meter_x + 52.0), Mm(flow.y - 4.2), &fonts.regular,
            );
            flow.y -= 11.0;
        }
        flow.gap(4.0);
    }

    // ── Mitigation ────────────────────────────────────────────────────────────
    flow.section("Suggested Risk Mitigation");
    for item in MITIGATIONS {
        flow.bullet(item, ACCENT_BLU);
    }
}

fn level_colors(level: RiskLevel) -> (Rgbf, Rgbf) {
    match level {
        RiskLevel::Low => (LOW_BG, LOW_FG),
        RiskLevel::Medium => (MED_BG, MED_FG),
        RiskLevel::High => (HIGH_BG, HIGH_FG),
    }
}

/// Add an A4 page with background and footer.
fn blank_page(doc: &PdfDocumentReference, fonts: &Fonts, name: &str) -> PdfLayerReference {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), name);
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);

    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, FOOTER_Y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by contract-riskr v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), &fonts.regular,
    );
    layer.use_text(
        "Heuristic keyword screening, not legal advice.",
        7.5, Mm(PAGE_W - MARGIN - 58.0), Mm(15.0), &fonts.regular,
    );

    layer
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn rgb((r, g, b): Rgbf) -> Color {
    Color::Rgb(Rgb { r, g, b, icc_profile: None })
}

fn set_color(layer: &PdfLayerReference, color: Rgbf) {
    layer.set_fill_color(rgb(color));
}

fn reset_colors(layer: &PdfLayerReference) {
    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_thickness(1.0);
}

fn fill_polygon(layer: &PdfLayerReference, ring: Vec<(Point, bool)>, color: Rgbf) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    reset_colors(layer);
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: Rgbf) {
    let ring = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
        .iter()
        .map(|&(px, py)| (Point::new(Mm(px), Mm(py)), false))
        .collect();
    fill_polygon(layer, ring, color);
}

/// Rounded rectangle as a polygon, 8 segments per corner arc.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    const SEGS: usize = 8;
    let r = r.min(w / 2.0).min(h / 2.0);
    let corners = [
        (x + w - r, y + r, 270.0f32),
        (x + w - r, y + h - r, 0.0f32),
        (x + r, y + h - r, 90.0f32),
        (x + r, y + r, 180.0f32),
    ];

    corners
        .iter()
        .flat_map(|&(cx, cy, start)| {
            (0..=SEGS).map(move |i| {
                let angle = (start + 90.0 * i as f32 / SEGS as f32).to_radians();
                (Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())), false)
            })
        })
        .collect()
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, r: f32, color: Rgbf) {
    fill_polygon(layer, rounded_rect_ring(x, y, w, h, r), color);
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, r: f32, color: Rgbf) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    reset_colors(layer);
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, color: Rgbf) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    reset_colors(layer);
}

/// Horizontal 0..=100 meter: tinted track with the filled share on top.
fn draw_meter(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, value: u8, color: Rgbf) {
    fill_rounded_rect(layer, x, y, w, h, h / 2.0, PANEL_BORDER);
    let filled = w * f32::from(value.min(100)) / 100.0;
    if filled > 0.0 {
        fill_rounded_rect(layer, x, y, filled.max(h), h, h / 2.0, color);
    }
}

/// Left-to-right gradient made of `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: Rgbf,
    to: Rgbf,
    steps: usize,
) {
    let step_w = w / steps as f32;
    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        let color = (lerp(from.0, to.0, t), lerp(from.1, to.1, t), lerp(from.2, to.2, t));
        // strips overlap slightly so no seams show
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, color);
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    } else {
        s.to_string()
    }
}

/// Greedy word wrap on character counts. Words longer than `max_chars` are
/// split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let current_len = current.chars().count();
        if current.is_empty() {
            current = word;
        } else if current_len + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::replace(&mut current, word));
        } else {
            current.push(' ');
            current.push_str(&word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClauseFinding, ClauseFindings, MediaType};

    fn assessment(risks: Vec<&str>, score: u8, level: RiskLevel) -> Assessment {
        let mut clauses = ClauseFindings::default();
        clauses.insert(
            "Termination Clause",
            ClauseFinding {
                description: "One party can terminate without notice.".to_string(),
                severity: 30,
            },
        );
        Assessment {
            file_name: "lease.pdf".to_string(),
            media_type: MediaType::Pdf,
            text: String::new(),
            preview: String::new(),
            risks: risks.into_iter().map(String::from).collect(),
            clauses,
            raw_score: score as i32,
            score,
            level,
            summary: crate::config::DEFAULT_SUMMARY.to_string(),
        }
    }

    fn page_count(bytes: &[u8]) -> usize {
        lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_single_assessment_is_one_page() {
        let bytes = render_to_bytes(&[assessment(
            vec!["Unilateral termination clause", "High fixed penalty amount"],
            60,
            RiskLevel::Medium,
        )])
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_risk_list_continues_on_new_page() {
        let risks = vec!["Restrictive non-compete clause"; 80];
        let bytes = render_to_bytes(&[assessment(risks, 100, RiskLevel::High)]).unwrap();
        assert!(page_count(&bytes) >= 2);
    }

    #[test]
    fn test_one_section_per_contract() {
        let bytes = render_to_bytes(&[
            assessment(vec![], 0, RiskLevel::Low),
            assessment(vec!["Ambiguous penalty clause"], 35, RiskLevel::Medium),
        ])
        .unwrap();
        assert_eq!(page_count(&bytes), 2);
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("contract_risk_report.pdf");
        render(&[assessment(vec![], 20, RiskLevel::Low)], &out).unwrap();
        assert!(std::fs::read(&out).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("short", 20), vec!["short"]);
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("lease.pdf", 20), "lease.pdf");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
