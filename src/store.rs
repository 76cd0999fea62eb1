//! 一覧のレコードストア
//!
//! 行単位の操作（削除・承認切替）は訪問IDごとの処理中フラグで分離する。
//! 別IDの操作は並行して進められ、同じIDの同じ操作は完了まで受け付けない。

use crate::api::VisitApi;
use crate::confirm::Confirmer;
use crate::error::AdminError;
use heritage_common::records::{confirmation_prompt, delete_prompt, remove_row, replace_row};
use heritage_common::VisitSummary;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// 行操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Done,
    /// 確認で「いいえ」
    Declined,
    /// 同じ行の同じ操作が処理中
    Busy,
    Failed(String),
}

#[derive(Default)]
struct State {
    visits: Vec<VisitSummary>,
    deleting: HashSet<i64>,
    confirming: HashSet<i64>,
    error: Option<String>,
}

pub struct RecordStore {
    state: Mutex<State>,
}

/// ユーザーに見せるエラーメッセージ
fn user_message(err: &AdminError) -> String {
    match err {
        AdminError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

impl RecordStore {
    pub fn new(visits: Vec<VisitSummary>) -> Self {
        Self {
            state: Mutex::new(State {
                visits,
                ..State::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn visits(&self) -> Vec<VisitSummary> {
        self.state().visits.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.state().deleting.contains(&id)
    }

    pub fn is_confirming(&self, id: i64) -> bool {
        self.state().confirming.contains(&id)
    }

    /// 確認の上で削除し、成功したら該当行を取り除く
    pub async fn delete(&self, api: &dyn VisitApi, confirmer: &dyn Confirmer, id: i64) -> RowOutcome {
        if self.is_deleting(id) {
            return RowOutcome::Busy;
        }
        match confirmer.confirm(&delete_prompt(id)) {
            Ok(true) => {}
            Ok(false) => return RowOutcome::Declined,
            Err(e) => return self.fail(&e),
        }
        if !self.state().deleting.insert(id) {
            return RowOutcome::Busy;
        }

        let result = api.delete_visit(id).await;

        let mut state = self.state();
        state.deleting.remove(&id);
        match result {
            Ok(()) => {
                remove_row(&mut state.visits, id);
                state.error = None;
                debug!("row #{} removed", id);
                RowOutcome::Done
            }
            Err(e) => {
                drop(state);
                self.fail(&e)
            }
        }
    }

    /// 確認の上で承認フラグを更新し、サーバーの返したレコードで行を置き換える
    pub async fn set_confirmation(
        &self,
        api: &dyn VisitApi,
        confirmer: &dyn Confirmer,
        id: i64,
        confirmed: bool,
    ) -> RowOutcome {
        if self.is_confirming(id) {
            return RowOutcome::Busy;
        }
        match confirmer.confirm(&confirmation_prompt(id, confirmed)) {
            Ok(true) => {}
            Ok(false) => return RowOutcome::Declined,
            Err(e) => return self.fail(&e),
        }
        if !self.state().confirming.insert(id) {
            return RowOutcome::Busy;
        }

        let result = api.set_confirmation(id, confirmed).await;

        let mut state = self.state();
        state.confirming.remove(&id);
        match result {
            Ok(updated) => {
                replace_row(&mut state.visits, id, &updated);
                state.error = None;
                debug!("row #{} confirmation = {}", id, updated.confirmed());
                RowOutcome::Done
            }
            Err(e) => {
                drop(state);
                self.fail(&e)
            }
        }
    }

    fn fail(&self, err: &AdminError) -> RowOutcome {
        let message = user_message(err);
        warn!("row action failed: {}", err);
        self.state().error = Some(message.clone());
        RowOutcome::Failed(message)
    }
}
