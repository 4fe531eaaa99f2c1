use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCell, TableCellContent,
    TableChild, TableRowChild,
};

use super::ConvertError;

/// Reads a DOCX package into plain text.
///
/// Body paragraphs come first, one per line. Tables follow: every row with at
/// least one non-empty cell becomes `cell | cell | ...`, which is the shape
/// the pipe-based experience and education extractors look for.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ConvertError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ConvertError::Docx(e.to_string()))?;

    let mut lines = Vec::new();
    let mut tables = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => tables.push(table),
            _ => {}
        }
    }
    for table in tables {
        lines.extend(table_rows(table));
    }

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }
    text
}

fn table_rows(table: &Table) -> Vec<String> {
    let mut rows = Vec::new();
    for row in &table.rows {
        #[allow(irrefutable_let_patterns)]
        let TableChild::TableRow(row) = row else {
            continue;
        };
        let cells: Vec<String> = row
            .cells
            .iter()
            .filter_map(|cell| {
                #[allow(irrefutable_let_patterns)]
                let TableRowChild::TableCell(cell) = cell else {
                    return None;
                };
                Some(cell_text(cell))
            })
            .filter(|text| !text.is_empty())
            .collect();
        if !cells.is_empty() {
            rows.push(cells.join(" | "));
        }
    }
    rows
}

fn cell_text(cell: &TableCell) -> String {
    cell.children
        .iter()
        .filter_map(|content| match content {
            TableCellContent::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Builds a minimal DOCX package in memory.
#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    use docx_rs::{Docx, Run, TableRow};

    let text_paragraph = |text: &str| Paragraph::new().add_run(Run::new().add_text(text));

    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(text_paragraph(*text));
    }
    if !rows.is_empty() {
        let rows = rows
            .iter()
            .map(|cells| {
                TableRow::new(
                    cells
                        .iter()
                        .map(|text| TableCell::new().add_paragraph(text_paragraph(*text)))
                        .collect(),
                )
            })
            .collect();
        docx = docx.add_table(Table::new(rows));
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buf).expect("pack docx");
    buf.into_inner()
}
