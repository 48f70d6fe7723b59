//! Quote document ("presupuesto") rendering.
//!
//! Takes one order and produces a complete PDF in memory: header with issuer
//! and customer blocks, a bordered four-column item table, the tax summary
//! and the signature boxes. Geometry is computed from a layout description
//! and a running cursor, so large orders flow onto continuation pages with a
//! repeated table header instead of overflowing the page.
//!
//! The renderer assumes a fully populated order; callers resolve
//! missing-order errors before invoking it.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use thiserror::Error;

use crate::domain::order::{LineItem, Order};
use crate::format::format_currency;
use crate::pricing::{split_total, TAX_RATE_PERCENT};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

/// Issuer block shown on every quote.
const ISSUER_LINES: [&str; 3] = [
    "Mueblería \"El Buen Descanso\"",
    "Av. Siempre Viva 123, Formosa",
    "Teléfono: 370-4123456",
];

// Page geometry in millimetres, A4 portrait, origin at the bottom-left.
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;

const TITLE_Y: f32 = 272.0;
const HEADER_LABEL_Y: f32 = 253.0;
const HEADER_LINE_STEP: f32 = 5.5;
const CUSTOMER_X: f32 = 115.0;

/// Item table: four columns between `left` and `right`, divider x positions
/// in between, fixed row height, and the lowest y a row may occupy. The
/// table header is drawn once per page, so a page fits one row fewer than
/// the raw space suggests.
struct TableLayout {
    left: f32,
    right: f32,
    units_x: f32,
    price_x: f32,
    total_x: f32,
    row_h: f32,
    first_top: f32,
    continuation_top: f32,
    bottom_limit: f32,
}

const TABLE: TableLayout = TableLayout {
    left: MARGIN,
    right: PAGE_W - MARGIN,
    units_x: 95.0,
    price_x: 125.0,
    total_x: 158.5,
    row_h: 7.0,
    first_top: 222.0,
    continuation_top: 272.0,
    bottom_limit: 40.0,
};

impl TableLayout {
    fn body_rows_fitting(&self, top: f32) -> usize {
        let slots = ((top - self.bottom_limit) / self.row_h) as usize;
        slots.saturating_sub(1) // header row takes the first slot
    }
}

/// Split `total_rows` body rows into per-page chunks. Always yields at least
/// one page so an empty order still renders its header-only table.
fn paginate(total_rows: usize, first_page_rows: usize, continuation_rows: usize) -> Vec<usize> {
    if total_rows <= first_page_rows {
        return vec![total_rows];
    }
    let mut pages = vec![first_page_rows];
    let mut remaining = total_rows - first_page_rows;
    while remaining > continuation_rows {
        pages.push(continuation_rows);
        remaining -= continuation_rows;
    }
    pages.push(remaining);
    pages
}

/// Download filename the client saves the stream under.
pub fn quote_filename(number: i64) -> String {
    format!("presupuesto-{number}.pdf")
}

/// Render the quote for `order` as a complete PDF byte stream.
pub fn render_quote(order: &Order) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Presupuesto ({})", order.number),
        mm(PAGE_W),
        mm(PAGE_H),
        "contenido",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut canvas = Canvas {
        layer: doc.get_page(first_page).get_layer(first_layer),
        regular,
        bold,
    };

    draw_header(&canvas, order);

    let plan = paginate(
        order.items.len(),
        TABLE.body_rows_fitting(TABLE.first_top),
        TABLE.body_rows_fitting(TABLE.continuation_top),
    );
    let mut items = order.items.iter();
    let mut cursor = TABLE.first_top;

    for (page_index, &row_count) in plan.iter().enumerate() {
        if page_index > 0 {
            let (page, layer) = doc.add_page(mm(PAGE_W), mm(PAGE_H), "contenido");
            canvas.layer = doc.get_page(page).get_layer(layer);
            cursor = TABLE.continuation_top;
        }
        let table_top = cursor;
        draw_table_header(&canvas, table_top);
        cursor -= TABLE.row_h;
        for _ in 0..row_count {
            if let Some(item) = items.next() {
                draw_item_row(&canvas, cursor, item);
                cursor -= TABLE.row_h;
            }
        }
        // `cursor` now sits at the bottom edge of the last drawn row.
        draw_dividers(&canvas, table_top, cursor);
    }

    // Summary and signatures need roughly 60 mm; move them to a fresh page
    // when the table ran too deep.
    if cursor - 60.0 < 12.0 {
        let (page, layer) = doc.add_page(mm(PAGE_W), mm(PAGE_H), "contenido");
        canvas.layer = doc.get_page(page).get_layer(layer);
        cursor = TABLE.continuation_top;
    }

    let summary_top = cursor - 10.0;
    draw_summary(&canvas, summary_top, order);
    draw_signatures(&canvas, summary_top - 30.0);

    doc.save_to_bytes().map_err(pdf_err)
}

fn pdf_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Pdf(e.to_string())
}

// ── drawing ──────────────────────────────────────────────────────────────────

/// Geometry is tracked as `f32` millimetres; this is the single conversion
/// point into printpdf's unit type.
fn mm(value: f32) -> Mm {
    Mm(value.into())
}

struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas {
    fn text(&self, s: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(s, size.into(), mm(x), mm(y), &self.regular);
    }

    fn text_bold(&self, s: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(s, size.into(), mm(x), mm(y), &self.bold);
    }

    fn text_centered(&self, s: &str, size: f32, center_x: f32, y: f32, bold: bool) {
        let x = center_x - text_width_mm(s, size) / 2.0;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(s, size.into(), mm(x), mm(y), font);
    }

    fn text_right(&self, s: &str, size: f32, right_x: f32, y: f32, bold: bool) {
        let x = right_x - text_width_mm(s, size);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(s, size.into(), mm(x), mm(y), font);
    }

    fn stroke(&self, points: &[(f32, f32)], closed: bool) {
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(mm(x), mm(y)), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn vline(&self, x: f32, y1: f32, y2: f32) {
        self.stroke(&[(x, y1), (x, y2)], false);
    }

    fn rect_outline(&self, x: f32, y_bottom: f32, width: f32, height: f32) {
        self.stroke(
            &[
                (x, y_bottom),
                (x + width, y_bottom),
                (x + width, y_bottom + height),
                (x, y_bottom + height),
            ],
            true,
        );
    }
}

fn draw_header(canvas: &Canvas, order: &Order) {
    canvas.text_centered(
        &format!("Presupuesto ({})", order.number),
        20.0,
        PAGE_W / 2.0,
        TITLE_Y,
        true,
    );

    canvas.text_bold("Datos Empresa", 10.0, MARGIN, HEADER_LABEL_Y);
    for (i, line) in ISSUER_LINES.iter().enumerate() {
        let y = HEADER_LABEL_Y - HEADER_LINE_STEP * (i as f32 + 1.0);
        canvas.text(line, 10.0, MARGIN, y);
    }

    let customer = &order.customer;
    canvas.text_bold("Datos Cliente", 10.0, CUSTOMER_X, HEADER_LABEL_Y);
    let customer_lines = [
        format!("{} {}", customer.first_name, customer.last_name),
        format!("Dirección: {}", customer.address),
        format!("Teléfono: {}", customer.phone),
    ];
    for (i, line) in customer_lines.iter().enumerate() {
        let y = HEADER_LABEL_Y - HEADER_LINE_STEP * (i as f32 + 1.0);
        canvas.text(&fit_text(line, 10.0, TABLE.right - CUSTOMER_X), 10.0, CUSTOMER_X, y);
    }
}

fn draw_table_header(canvas: &Canvas, top: f32) {
    let baseline = top - 5.0;
    canvas.text_bold("Descripción", 10.0, TABLE.left + 2.0, baseline);
    canvas.text_centered(
        "Unidades",
        10.0,
        (TABLE.units_x + TABLE.price_x) / 2.0,
        baseline,
        true,
    );
    canvas.text_centered(
        "Precio",
        10.0,
        (TABLE.price_x + TABLE.total_x) / 2.0,
        baseline,
        true,
    );
    canvas.text_centered(
        "Total",
        10.0,
        (TABLE.total_x + TABLE.right) / 2.0,
        baseline,
        true,
    );
    canvas.rect_outline(TABLE.left, top - TABLE.row_h, TABLE.right - TABLE.left, TABLE.row_h);
}

fn draw_item_row(canvas: &Canvas, top: f32, item: &LineItem) {
    let baseline = top - 5.0;
    let description = fit_text(&item.name, 10.0, TABLE.units_x - TABLE.left - 4.0);
    canvas.text(&description, 10.0, TABLE.left + 2.0, baseline);
    canvas.text_centered(
        &item.quantity.to_string(),
        10.0,
        (TABLE.units_x + TABLE.price_x) / 2.0,
        baseline,
        false,
    );
    canvas.text_centered(
        &money(&item.unit_price),
        10.0,
        (TABLE.price_x + TABLE.total_x) / 2.0,
        baseline,
        false,
    );
    canvas.text_centered(
        &money(&item.line_total()),
        10.0,
        (TABLE.total_x + TABLE.right) / 2.0,
        baseline,
        false,
    );
    canvas.rect_outline(TABLE.left, top - TABLE.row_h, TABLE.right - TABLE.left, TABLE.row_h);
}

/// Vertical dividers spanning header and body rows of one page segment.
fn draw_dividers(canvas: &Canvas, top: f32, bottom: f32) {
    for x in [TABLE.units_x, TABLE.price_x, TABLE.total_x] {
        canvas.vline(x, top, bottom);
    }
}

fn draw_summary(canvas: &Canvas, top: f32, order: &Order) {
    let breakdown = split_total(&order.total);
    let rows = [
        ("SUB-TOTAL:".to_string(), money(&breakdown.subtotal)),
        (format!("IVA ({TAX_RATE_PERCENT}%):"), money(&breakdown.tax)),
        // The grand total is the stored order total verbatim, never a
        // recomputation from the items.
        ("TOTAL PRESUPUESTO:".to_string(), money(&order.total)),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = top - 6.0 * i as f32;
        canvas.text_right(label, 10.0, TABLE.total_x, y, true);
        canvas.text_right(value, 10.0, TABLE.right, y, false);
    }
}

fn draw_signatures(canvas: &Canvas, top: f32) {
    canvas.text("Firma", 10.0, MARGIN + 2.0, top);
    canvas.text("Firma del cliente", 10.0, CUSTOMER_X + 2.0, top);
    canvas.rect_outline(MARGIN, top - 22.0, 77.0, 18.0);
    canvas.rect_outline(CUSTOMER_X, top - 22.0, 77.0, 18.0);
}

fn money(amount: &bigdecimal::BigDecimal) -> String {
    format!("${}", format_currency(amount))
}

// ── text measurement ─────────────────────────────────────────────────────────

const PT_TO_MM: f32 = 0.352_778;

/// Approximate Helvetica advance width in ems. Digits and most lowercase
/// glyphs advance 556/1000 em; the table only needs alignment that is close
/// enough for centered and right-aligned labels and numbers.
fn char_width_em(c: char) -> f32 {
    match c {
        ' ' | '.' | ',' | ':' | ';' | '(' | ')' | '!' | '\'' => 0.278,
        'i' | 'j' | 'l' | 't' | 'f' | 'I' => 0.278,
        'r' => 0.333,
        '-' => 0.333,
        'm' | 'w' => 0.778,
        'M' | 'W' => 0.889,
        'A'..='Z' | 'Á'..='Ú' => 0.667,
        _ => 0.556,
    }
}

fn text_width_mm(s: &str, font_size_pt: f32) -> f32 {
    let ems: f32 = s.chars().map(char_width_em).sum();
    ems * font_size_pt * PT_TO_MM
}

/// Truncate `s` with an ellipsis so it fits `max_width_mm` at `size`.
fn fit_text(s: &str, size: f32, max_width_mm: f32) -> String {
    if text_width_mm(s, size) <= max_width_mm {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        let candidate = format!("{out}{c}…");
        if text_width_mm(&candidate, size) > max_width_mm {
            break;
        }
        out.push(c);
    }
    format!("{out}…")
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;
    use crate::domain::order::{Customer, OrderStatus};

    fn order_with_items(count: usize) -> Order {
        Order {
            number: 1712345678901,
            customer: Customer {
                first_name: "Ana".to_string(),
                last_name: "Diaz".to_string(),
                address: "Calle 1".to_string(),
                phone: "123".to_string(),
                delivery_window: None,
                payment_method: "efectivo".to_string(),
            },
            items: (0..count)
                .map(|i| LineItem {
                    name: format!("Artículo {i}"),
                    quantity: (i as i32 % 5) + 1,
                    unit_price: BigDecimal::from(1000 + i as i64),
                })
                .collect(),
            total: BigDecimal::from(2000),
            created_at: Utc::now(),
            status: OrderStatus::Processing,
        }
    }

    #[test]
    fn paginate_puts_everything_on_one_page_when_it_fits() {
        assert_eq!(paginate(0, 25, 32), vec![0]);
        assert_eq!(paginate(10, 25, 32), vec![10]);
        assert_eq!(paginate(25, 25, 32), vec![25]);
    }

    #[test]
    fn paginate_overflows_to_continuation_pages_in_order() {
        assert_eq!(paginate(26, 25, 32), vec![25, 1]);
        assert_eq!(paginate(90, 25, 32), vec![25, 32, 32, 1]);
    }

    #[test]
    fn paginate_chunks_sum_to_the_total() {
        for total in [0, 1, 24, 25, 26, 57, 58, 100, 500] {
            let plan = paginate(total, 25, 32);
            assert_eq!(plan.iter().sum::<usize>(), total);
            assert!(!plan.is_empty());
        }
    }

    #[test]
    fn table_capacity_reserves_a_slot_for_the_header_row() {
        let first = TABLE.body_rows_fitting(TABLE.first_top);
        let continuation = TABLE.body_rows_fitting(TABLE.continuation_top);
        assert!(first > 0);
        assert!(continuation > first, "continuation pages have no header block");
    }

    #[test]
    fn quote_filename_embeds_the_order_number() {
        assert_eq!(quote_filename(42), "presupuesto-42.pdf");
    }

    #[test]
    fn fit_text_keeps_short_strings_untouched() {
        assert_eq!(fit_text("Silla", 10.0, 70.0), "Silla");
    }

    #[test]
    fn fit_text_truncates_long_strings_with_ellipsis() {
        let long = "Sillón reclinable de tres cuerpos tapizado en cuero genuino";
        let fitted = fit_text(long, 10.0, 70.0);
        assert!(fitted.ends_with('…'));
        assert!(text_width_mm(&fitted, 10.0) <= 70.0);
    }

    #[test]
    fn renders_a_pdf_for_a_typical_order() {
        let bytes = render_quote(&order_with_items(3)).expect("render failed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_gracefully_with_no_items() {
        let bytes = render_quote(&order_with_items(0)).expect("render failed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_a_multi_page_order() {
        let bytes = render_quote(&order_with_items(120)).expect("render failed");
        assert!(bytes.starts_with(b"%PDF"));
        // 120 rows never fit on the first page, so the plan must span pages.
        let plan = paginate(
            120,
            TABLE.body_rows_fitting(TABLE.first_top),
            TABLE.body_rows_fitting(TABLE.continuation_top),
        );
        assert!(plan.len() > 1);
    }
}
