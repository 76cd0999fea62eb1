//! 端末表示用のテキスト整形

use heritage_common::detail::DetailView;
use heritage_common::{ListView, Pager, VisitSummary};

const HEADERS: [&str; 6] = ["#", "User", "Visit Date", "Created", "Plot #", "Confirmed"];

/// 表示幅を超える文字列を切り詰める
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn row_cells(visit: &VisitSummary) -> [String; 6] {
    [
        visit.id.to_string(),
        visit.user().to_string(),
        visit.visit_date().to_string(),
        visit.created_at().to_string(),
        visit.plot_number().to_string(),
        if visit.confirmed() { "[x]" } else { "[ ]" }.to_string(),
    ]
}

/// 一覧表（現在ページの行のみ）
pub fn render_table(rows: &[&VisitSummary]) -> String {
    const MAX_WIDTH: usize = 28;
    let cells: Vec<[String; 6]> = rows.iter().map(|v| row_cells(v)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count()).min(MAX_WIDTH);
        }
    }

    let format_row = |items: &[String]| -> String {
        items
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", clip(cell, *w), width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let mut out = format_row(&header);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &cells {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

/// ページ送りの表示（1ページ以下なら空）
///
/// `<< < 1 [2] 3 > >>`、端のページでは `<<`/`<` や `>`/`>>` を括弧で無効表示
pub fn render_pager(pager: &Pager) -> String {
    if !pager.controls_visible() {
        return String::new();
    }
    let nav = |label: &str, disabled: bool| {
        if disabled {
            format!("({})", label)
        } else {
            label.to_string()
        }
    };

    let mut parts = vec![nav("<<", pager.at_first()), nav("<", pager.at_first())];
    for page in pager.page_window() {
        if page == pager.current_page() {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    parts.push(nav(">", pager.at_last()));
    parts.push(nav(">>", pager.at_last()));

    format!(
        "{}    Page {} of {}",
        parts.join(" "),
        pager.current_page(),
        pager.total_pages()
    )
}

/// 一覧画面全体
pub fn render_list(view: &ListView, visits: &[VisitSummary], error: Option<&str>) -> String {
    let mut out = String::from("Visits\n");
    if !view.query().is_empty() {
        out.push_str(&format!("Search: {}\n", view.query()));
    }
    if let Some(error) = error {
        out.push_str(&format!("Error: {}\n", error));
    }
    out.push('\n');

    let rows = view.rows(visits);
    if rows.is_empty() {
        out.push_str("No visits found.\n");
    } else {
        out.push_str(&render_table(&rows));
    }

    let pager = render_pager(view.pager());
    if !pager.is_empty() {
        out.push('\n');
        out.push_str(&pager);
        out.push('\n');
    }
    out
}

/// 詳細画面（情報セクションとギャラリー）
pub fn render_detail_text(view: &DetailView) -> String {
    let mut out = format!("Visit #{}\n", view.visit_id);

    for block in view.info_blocks() {
        out.push_str(&format!("\n== {} ==\n", block.title));
        let width = block
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        for row in &block.rows {
            out.push_str(&format!("  {:<width$}  {}\n", row.label, row.value, width = width));
        }
    }

    for gallery in view.galleries() {
        out.push_str(&format!("\n== {} ({}) ==\n", gallery.title, gallery.images.len()));
        for image in &gallery.images {
            if image.rotation == 0 {
                out.push_str(&format!("  {}. {}\n", image.index + 1, image.url));
            } else {
                out.push_str(&format!(
                    "  {}. {}  ({}°)\n",
                    image.index + 1,
                    image.url,
                    image.rotation
                ));
            }
        }
    }
    out
}

/// 印刷用プレーンテキスト
pub fn render_print_text(view: &DetailView, title: &str, generated_at: &str) -> String {
    let mut out = format!("{}\nVisit ID: {}\nGenerated: {}\n", title, view.visit_id, generated_at);
    out.push_str(&"=".repeat(60));
    out.push('\n');
    let detail = render_detail_text(view);
    // 先頭の "Visit #id" 行は表紙と重複するので除く
    out.push_str(detail.split_once('\n').map(|(_, rest)| rest).unwrap_or(""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use heritage_common::detail::{DetailBlock, GalleryBlock, GalleryImage, InfoBlock, InfoRow};
    use heritage_common::SummaryAttributes;

    fn visit(id: i64, user: &str, confirmed: bool) -> VisitSummary {
        VisitSummary {
            id,
            attributes: SummaryAttributes {
                user: Some(user.to_string()),
                visitdate: Some("2024-05-01".to_string()),
                created_at: None,
                plot_number: Some("P-1".to_string()),
                confirmation: Some(confirmed),
            },
        }
    }

    #[test]
    fn test_table_rows() {
        let a = visit(1, "alice", true);
        let b = visit(2, "bob", false);
        let table = render_table(&[&a, &b]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# "));
        assert!(lines[2].contains("alice") && lines[2].contains("[x]"));
        assert!(lines[3].contains("bob") && lines[3].contains("[ ]"));
    }

    #[test]
    fn test_pager_hidden_for_single_page() {
        assert_eq!(render_pager(&Pager::new(10)), "");
        assert_eq!(render_pager(&Pager::new(0)), "");
    }

    #[test]
    fn test_pager_window() {
        let mut pager = Pager::new(45);
        pager.go_to(3);
        let text = render_pager(&pager);
        assert!(text.starts_with("<< < 2 [3] 4 > >>"));
        assert!(text.ends_with("Page 3 of 5"));

        pager.first();
        assert!(render_pager(&pager).starts_with("(<<) (<) [1] 2 3 > >>"));
        pager.last();
        assert!(render_pager(&pager).starts_with("<< < 4 [5] (>) (>>)"));
    }

    #[test]
    fn test_list_empty_result() {
        let visits = vec![visit(1, "alice", false)];
        let mut view = ListView::new(&visits);
        view.set_query(&visits, "zzz");
        let text = render_list(&view, &visits, Some("Failed to delete visit"));
        assert!(text.contains("No visits found."));
        assert!(text.contains("Error: Failed to delete visit"));
    }

    #[test]
    fn test_detail_text() {
        let view = DetailView {
            visit_id: 5,
            blocks: vec![
                DetailBlock::Info(InfoBlock {
                    default_title: "Basic Information",
                    title: "Basics".to_string(),
                    rows: vec![InfoRow {
                        default_label: "City",
                        label: "Town".to_string(),
                        value: "Cairo".to_string(),
                    }],
                }),
                DetailBlock::Gallery(GalleryBlock {
                    default_title: "Roof Photos",
                    key: "roofPhotos",
                    title: "Roof Photos".to_string(),
                    images: vec![GalleryImage {
                        index: 0,
                        url: "https://h/a.jpg".to_string(),
                        alt: "Roof Photos 1".to_string(),
                        rotation: 90,
                    }],
                }),
            ],
        };
        let text = render_detail_text(&view);
        assert!(text.contains("== Basics =="));
        assert!(text.contains("Town  Cairo"));
        assert!(text.contains("1. https://h/a.jpg  (90°)"));

        let print = render_print_text(&view, "Heritage Visit Report", "2024-05-01 10:00");
        assert!(print.starts_with("Heritage Visit Report\nVisit ID: 5\n"));
        assert!(!print.contains("Visit #5"));
    }
}
