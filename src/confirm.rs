//! 破壊的操作の確認プロンプト

use crate::error::{AdminError, Result};
use dialoguer::Confirm;

/// はい/いいえの確認
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// 端末で確認する（既定は「いいえ」）
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AdminError::Prompt(e.to_string()))
    }
}

/// 常に同じ答えを返す（`--yes` 用）
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}
