//! 一覧の行操作（削除・承認切替）で共有する処理

use crate::types::VisitSummary;

/// 削除確認の文言
pub fn delete_prompt(id: i64) -> String {
    format!("Delete visit #{}?", id)
}

/// 承認切替確認の文言（切替後の値で表示）
pub fn confirmation_prompt(id: i64, confirmed: bool) -> String {
    let state = if confirmed { "confirmed" } else { "un-confirmed" };
    format!("Mark visit #{} as {}?", id, state)
}

/// 指定IDの行を取り除く
pub fn remove_row(visits: &mut Vec<VisitSummary>, id: i64) {
    visits.retain(|v| v.id != id);
}

/// 指定IDの行をサーバーの返したレコードで置き換える
pub fn replace_row(visits: &mut [VisitSummary], id: i64, updated: &VisitSummary) {
    for row in visits.iter_mut().filter(|v| v.id == id) {
        *row = updated.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SummaryAttributes;

    fn visit(id: i64, confirmed: bool) -> VisitSummary {
        VisitSummary {
            id,
            attributes: SummaryAttributes {
                confirmation: Some(confirmed),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_prompt_texts() {
        assert_eq!(delete_prompt(7), "Delete visit #7?");
        assert_eq!(confirmation_prompt(3, true), "Mark visit #3 as confirmed?");
        assert_eq!(confirmation_prompt(3, false), "Mark visit #3 as un-confirmed?");
    }

    #[test]
    fn test_remove_row_only_that_id() {
        let mut visits = vec![visit(5, false), visit(7, false), visit(9, false)];
        remove_row(&mut visits, 7);
        let ids: Vec<i64> = visits.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![5, 9]);

        remove_row(&mut visits, 100);
        assert_eq!(visits.len(), 2);
    }

    #[test]
    fn test_replace_row() {
        let mut visits = vec![visit(2, false), visit(3, false)];
        replace_row(&mut visits, 3, &visit(3, true));
        assert!(!visits[0].confirmed());
        assert!(visits[1].confirmed());
    }
}
