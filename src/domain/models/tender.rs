// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 招标处理状态
///
/// 序列化值与展示层保存的希伯来文状态一致。管道本身只输出默认值。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TenderStatus {
    /// 尚未处理
    #[default]
    #[serde(rename = "טרם טופל")]
    NotYetProcessed,
    /// 已提交报价
    #[serde(rename = "שלחנו הצעה")]
    OfferSent,
    /// 报价已批准
    #[serde(rename = "הצעת מחיר אושרה")]
    QuoteApproved,
    /// 已下订单
    #[serde(rename = "הופקה הזמנה")]
    OrderIssued,
    /// 已开发票
    #[serde(rename = "הופקה חשבונית")]
    InvoiceIssued,
    #[serde(rename = "סגור")]
    Closed,
    #[serde(rename = "לא רלוונטי")]
    NotRelevant,
}

/// 规范化后的招标记录（管道输出单元）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    /// 开始接受投标的日期，`DD/MM/YYYY` 或空
    #[serde(default)]
    pub submission_start: String,
    /// 发布日期，仅供参考；没有可靠来源时整个字段省略
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    /// 投标截止日期，`DD/MM/YYYY` 或空
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub status: TenderStatus,
    #[serde(default)]
    pub description: String,
    pub tender_url: String,
    /// 发布日期是否来自明确标注的字段（而不是列表页的启发式猜测）
    #[serde(skip)]
    pub publish_date_confirmed: bool,
}

impl Tender {
    /// 去重键：优先 `tenderUrl`，其次 `id`；两者皆空时返回 `None`
    pub fn merge_key(&self) -> Option<&str> {
        let url = self.tender_url.trim();
        if !url.is_empty() {
            return Some(url);
        }
        let id = self.id.trim();
        if !id.is_empty() {
            return Some(id);
        }
        None
    }

    /// 当前记录的发布日期（可能为空）
    pub fn publish_date_str(&self) -> &str {
        self.publish_date.as_deref().unwrap_or("")
    }
}
