use anyhow::{Result, anyhow};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::model::WeekBucket;
use crate::report::format_hours;

// A4 portrait, all coordinates in millimeters from the bottom-left.
const PAGE_W: f64 = 210.0;
const PAGE_H: f64 = 297.0;
const MARGIN_LEFT: f64 = 14.0;
const MARGIN_BOTTOM: f64 = 16.0;
const TOP_Y: f64 = PAGE_H - 16.0;
const LINE_H: f64 = 4.6;
const ROW_GAP: f64 = 2.0;
const SECTION_GAP: f64 = 6.0;

// Column layout: [name, surname, email, department, tasks, total]
const COL_X: [f64; 6] = [14.0, 42.0, 68.0, 118.0, 144.0, 190.0];
const COL_CLIP: [usize; 5] = [16, 14, 28, 14, 26];
const TABLE_HEAD: [&str; 6] = ["Name", "Surname", "Email", "Department", "Tasks", "Total"];

/// Render the paginated tabular document: one section per week, in the
/// grouping engine's descending order, each headed by the week label.
/// Task lists are drawn in full; only the line text is clipped to its
/// column, never the number of lines.
pub fn render(weeks: &[WeekBucket]) -> Result<Vec<u8>> {
  let (doc, page, layer) = PdfDocument::new("Timesheet Report", mm(PAGE_W), mm(PAGE_H), "Layer 1");
  let font = doc
    .add_builtin_font(BuiltinFont::Helvetica)
    .map_err(|e| anyhow!("adding builtin font: {}", e))?;
  let bold = doc
    .add_builtin_font(BuiltinFont::HelveticaBold)
    .map_err(|e| anyhow!("adding builtin font: {}", e))?;

  let mut layer_ref: PdfLayerReference = doc.get_page(page).get_layer(layer);
  let mut y = TOP_Y;

  text(&layer_ref, "Timesheet Report", 14.0, MARGIN_LEFT, y, &bold);
  y -= SECTION_GAP + LINE_H;

  for week in weeks {
    // Estimated row height from the average task count per employee in
    // this week; used to decide whether the section still fits.
    let est_rows = estimated_row_height(week);
    if y - (LINE_H * 2.0 + est_rows) < MARGIN_BOTTOM {
      layer_ref = new_page(&doc);
      y = TOP_Y;
    }

    text(&layer_ref, &week.label, 11.0, MARGIN_LEFT, y, &bold);
    y -= LINE_H + 1.0;
    draw_table_head(&layer_ref, y, &bold);
    y -= LINE_H;

    for emp in &week.employees {
      let lines = emp.tasks.len().max(1) as f64;
      let row_h = lines * LINE_H + ROW_GAP;
      if y - row_h < MARGIN_BOTTOM {
        layer_ref = new_page(&doc);
        y = TOP_Y;
        draw_table_head(&layer_ref, y, &bold);
        y -= LINE_H;
      }

      text(&layer_ref, &clip(&emp.name, COL_CLIP[0]), 8.0, COL_X[0], y, &font);
      text(&layer_ref, &clip(&emp.surname, COL_CLIP[1]), 8.0, COL_X[1], y, &font);
      text(&layer_ref, &clip(&emp.email, COL_CLIP[2]), 8.0, COL_X[2], y, &font);
      text(
        &layer_ref,
        &clip(emp.department.as_deref().unwrap_or(""), COL_CLIP[3]),
        8.0,
        COL_X[3],
        y,
        &font,
      );
      text(&layer_ref, &format_hours(emp.total), 8.0, COL_X[5], y, &font);

      let mut task_y = y;
      for task in &emp.tasks {
        let bullet = format!("- {}", task.description);
        text(&layer_ref, &clip(&bullet, COL_CLIP[4]), 8.0, COL_X[4], task_y, &font);
        task_y -= LINE_H;
      }

      y -= row_h;
    }

    y -= SECTION_GAP;
  }

  doc.save_to_bytes().map_err(|e| anyhow!("serializing pdf: {}", e))
}

fn estimated_row_height(week: &WeekBucket) -> f64 {
  if week.employees.is_empty() {
    return LINE_H + ROW_GAP;
  }
  let task_total: usize = week.employees.iter().map(|e| e.tasks.len()).sum();
  let avg = (task_total as f64 / week.employees.len() as f64).max(1.0);
  avg * LINE_H + ROW_GAP
}

fn draw_table_head(layer: &PdfLayerReference, y: f64, bold: &IndirectFontRef) {
  for (i, head) in TABLE_HEAD.iter().enumerate() {
    text(layer, head, 8.5, COL_X[i], y, bold);
  }
}

fn new_page(doc: &printpdf::PdfDocumentReference) -> PdfLayerReference {
  let (page, layer) = doc.add_page(mm(PAGE_W), mm(PAGE_H), "Layer 1");
  doc.get_page(page).get_layer(layer)
}

fn text(layer: &PdfLayerReference, s: &str, size: f32, x: f64, y: f64, font: &IndirectFontRef) {
  layer.use_text(s, size as _, mm(x), mm(y), font);
}

fn mm(v: f64) -> Mm {
  Mm(v as _)
}

/// Clip a cell to its column width in characters, marking the cut.
fn clip(s: &str, max_chars: usize) -> String {
  if s.chars().count() <= max_chars {
    return s.to_string();
  }
  let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
  out.push('~');
  out
}
