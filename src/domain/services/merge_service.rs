// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::models::tender::Tender;
use crate::utils::url_utils::stable_hash;

/// 合并各来源的记录并去重
///
/// 去重键为 `tenderUrl`（去除首尾空白），为空时退回 `id`；两者皆空的记录被丢弃。
/// 同一键首次出现的记录保留，之后的重复记录直接丢弃，不合并字段。
/// URL 不同但 `id` 已被占用的记录会改写为 `<id>-<8位哈希>`，保证 `id` 唯一。
///
/// # 参数
///
/// * `tenders` - 按来源顺序拼接的记录
///
/// # 返回值
///
/// 保持输入顺序的去重结果
pub fn merge_and_dedupe(tenders: Vec<Tender>) -> Vec<Tender> {
    let input_count = tenders.len();
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(input_count);
    let mut keyless = 0usize;

    for mut tender in tenders {
        let Some(key) = tender.merge_key().map(str::to_string) else {
            keyless += 1;
            continue;
        };
        if !seen_keys.insert(key.clone()) {
            continue;
        }

        if tender.id.trim().is_empty() {
            tender.id = stable_hash(&key, 16);
        }
        let mut salt = 0u32;
        while seen_ids.contains(&tender.id) {
            let seed = if salt == 0 {
                key.clone()
            } else {
                format!("{}#{}", key, salt)
            };
            tender.id = format!("{}-{}", tender.id, stable_hash(&seed, 8));
            salt += 1;
        }
        seen_ids.insert(tender.id.clone());
        merged.push(tender);
    }

    debug!(
        "Merged {} records into {} ({} without key)",
        input_count,
        merged.len(),
        keyless
    );
    merged
}
