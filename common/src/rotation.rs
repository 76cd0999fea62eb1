//! 画像の表示回転（訪問IDごとに保存）
//!
//! キーは (セクションタイトル, 画像インデックス)、値は 0/90/180/270。
//! 表示専用で、レコード本体やAPIには一切反映しない。

use crate::error::Result;
use crate::storage::{get_json, rotations_key, set_json, KvStore};
use serde_json::Value;
use std::collections::BTreeMap;

/// 回転方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    /// 反時計回り（-90°）
    Left,
    /// 時計回り（+90°）
    Right,
}

impl RotateDirection {
    pub fn step(&self) -> i32 {
        match self {
            RotateDirection::Left => -90,
            RotateDirection::Right => 90,
        }
    }
}

/// 角度を {0, 90, 180, 270} に正規化
pub fn normalize_angle(degrees: i32) -> u16 {
    let snapped = (degrees as f64 / 90.0).round() as i32 * 90;
    snapped.rem_euclid(360) as u16
}

/// 保存キー: "セクション#インデックス"
fn image_key(section: &str, index: usize) -> String {
    format!("{}#{}", section, index)
}

/// 1訪問分の回転状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    visit_id: i64,
    angles: BTreeMap<String, i32>,
}

impl RotationState {
    /// 読めない値はその画像だけ捨てる
    pub fn load(store: &dyn KvStore, visit_id: i64) -> Self {
        let raw: BTreeMap<String, Value> =
            get_json(store, &rotations_key(visit_id)).unwrap_or_default();
        let angles = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let deg = value.as_i64().and_then(|d| i32::try_from(d).ok())?;
                Some((key, deg))
            })
            .collect();
        Self { visit_id, angles }
    }

    /// 保存せずに使う空の状態
    pub fn new(visit_id: i64) -> Self {
        Self {
            visit_id,
            angles: BTreeMap::new(),
        }
    }

    pub fn visit_id(&self) -> i64 {
        self.visit_id
    }

    /// 現在の表示角度
    pub fn angle(&self, section: &str, index: usize) -> u16 {
        self.angles
            .get(&image_key(section, index))
            .map(|&deg| normalize_angle(deg))
            .unwrap_or(0)
    }

    /// 90°回転して新しい角度を返す（メモリのみ）
    pub fn rotate(&mut self, section: &str, index: usize, direction: RotateDirection) -> u16 {
        let next = normalize_angle(self.angle(section, index) as i32 + direction.step());
        self.angles.insert(image_key(section, index), next as i32);
        next
    }

    /// 回転して即保存
    pub fn rotate_and_save(
        &mut self,
        store: &dyn KvStore,
        section: &str,
        index: usize,
        direction: RotateDirection,
    ) -> Result<u16> {
        let next = self.rotate(section, index, direction);
        self.save(store)?;
        Ok(next)
    }

    pub fn save(&self, store: &dyn KvStore) -> Result<()> {
        set_json(store, &rotations_key(self.visit_id), &self.angles)
    }
}

/// CSSのtransform値
pub fn css_transform(angle: u16) -> String {
    format!("rotate({}deg)", angle)
}
