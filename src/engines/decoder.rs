// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io::Read;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

/// 解压错误
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Decompression failed ({encoding}): {source}")]
    Decompression {
        encoding: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// 按 Content-Encoding 解压并解码为 UTF-8 文本
///
/// 解压在阻塞线程池中执行；任何失败都回退为原始字节的 UTF-8 解释。
pub async fn decode_body(encoding: &str, body: Bytes) -> String {
    if body.is_empty() {
        return String::new();
    }

    let encoding = encoding.to_string();
    let raw = body.clone();
    match tokio::task::spawn_blocking(move || decode_bytes(&encoding, &body)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Decoder task failed, using raw body: {}", e);
            String::from_utf8_lossy(&raw).into_owned()
        }
    }
}

/// 同步版本的 [`decode_body`]
pub fn decode_bytes(encoding: &str, body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }

    match decompress(encoding, body) {
        Ok(Some(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        Ok(None) => String::from_utf8_lossy(body).into_owned(),
        Err(e) => {
            debug!("{}, falling back to raw body", e);
            String::from_utf8_lossy(body).into_owned()
        }
    }
}

/// 返回 `Ok(None)` 表示无需解压
fn decompress(encoding: &str, body: &[u8]) -> Result<Option<Vec<u8>>, DecodeError> {
    let enc = encoding.to_ascii_lowercase();
    let mut out = Vec::new();

    if enc.contains("br") {
        brotli::Decompressor::new(body, 4096)
            .read_to_end(&mut out)
            .map_err(|source| DecodeError::Decompression {
                encoding: "br",
                source,
            })?;
    } else if enc.contains("gzip") {
        flate2::read::GzDecoder::new(body)
            .read_to_end(&mut out)
            .map_err(|source| DecodeError::Decompression {
                encoding: "gzip",
                source,
            })?;
    } else if enc.contains("deflate") {
        // zlib-wrapped first, raw deflate streams as a second chance
        if flate2::read::ZlibDecoder::new(body)
            .read_to_end(&mut out)
            .is_err()
        {
            out.clear();
            flate2::read::DeflateDecoder::new(body)
                .read_to_end(&mut out)
                .map_err(|source| DecodeError::Decompression {
                    encoding: "deflate",
                    source,
                })?;
        }
    } else {
        return Ok(None);
    }

    Ok(Some(out))
}
