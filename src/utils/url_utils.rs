// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sha2::{Digest, Sha256};

/// 将站点内的 href 转换为带协议的绝对 URL
///
/// - `http://` / `https://` 原样返回
/// - `//host/path` 继承 base 的协议
/// - `/path` 拼接为 `base + /path`
/// - 其他相对路径拼接为 `base + "/" + href`
///
/// 空值、锚点、`javascript:` / `mailto:` / `tel:` 链接以及拼接后缺少主机的
/// 结果（如 `http://`、`//`）返回 `None`。
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    join_href(base, href).filter(|url| is_absolute_http(url))
}

fn join_href(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(href.to_string());
    }

    let base = base.trim_end_matches('/');
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = base.split("://").next().unwrap_or("https");
        return Some(format!("{}://{}", scheme, rest));
    }
    if href.starts_with('/') {
        return Some(format!("{}{}", base, href));
    }
    Some(format!("{}/{}", base, href))
}

/// 判断 URL 是否为带协议的绝对地址
pub fn is_absolute_http(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// 由 URL 生成稳定的短哈希（十六进制），用于没有原生编号的记录
pub fn stable_hash(input: &str, hex_len: usize) -> String {
    let digest = Sha256::digest(input.trim().as_bytes());
    let mut out = hex::encode(digest);
    out.truncate(hex_len);
    out
}
