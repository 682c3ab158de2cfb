// 扫描器：通过 wpa_cli 触发扫描并读取 scan_results

use crate::structs::Network;
use crate::traits::WifiScanner;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct WpaCliScanner {
    interface: String,
    // SCAN 是异步的，需要等待一段时间再读取结果
    scan_wait: Duration,
}

impl WpaCliScanner {
    pub fn new(interface: impl Into<String>, scan_wait: Duration) -> Self {
        Self {
            interface: interface.into(),
            scan_wait,
        }
    }

    async fn wpa_cli(&self, cmd: &str) -> Result<String> {
        let output = Command::new("wpa_cli")
            .arg("-i")
            .arg(&self.interface)
            .arg(cmd)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(format!(
                "wpa_cli {} failed: {}",
                cmd, error_msg
            )));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

#[async_trait]
impl WifiScanner for WpaCliScanner {
    async fn scan(&self) -> Result<Vec<Network>> {
        tracing::debug!("Sending SCAN on {}...", self.interface);
        let reply = self.wpa_cli("scan").await?;
        if reply.trim() == "FAIL-BUSY" {
            // 已有扫描在进行中，直接等待其结果即可
            tracing::debug!("Scan already in progress, reusing it");
        } else if reply.trim() != "OK" {
            return Err(Error::CommandFailed(format!("SCAN rejected: {}", reply.trim())));
        }

        tracing::debug!("Waiting {:?} for scan results...", self.scan_wait);
        tokio::time::sleep(self.scan_wait).await;

        let results = self.wpa_cli("scan_results").await?;
        let networks = parse_scan_results(&results);
        tracing::info!("📡 Scan found {} networks on {}", networks.len(), self.interface);
        Ok(networks)
    }
}

/// 将 wpa_supplicant 输出中的 `\xHH` 转义序列反转义回原始字节。
/// 主要用于处理 SSID 中的非 ASCII 字符。
fn unescape_wpa_ssid(s: &str) -> Vec<u8> {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(10 + b - b'a'),
            b'A'..=b'F' => Some(10 + b - b'A'),
            _ => None,
        }
    }

    let bs = s.as_bytes();
    let mut out = Vec::with_capacity(bs.len());
    let mut i = 0;
    while i < bs.len() {
        if bs[i] != b'\\' || i + 1 >= bs.len() {
            out.push(bs[i]);
            i += 1;
            continue;
        }

        match bs[i + 1] {
            b'x' | b'X' if i + 3 < bs.len() => {
                if let (Some(hi), Some(lo)) = (hex_val(bs[i + 2]), hex_val(bs[i + 3])) {
                    out.push((hi << 4) | lo);
                    i += 4;
                } else {
                    // 格式不正确，按字面量保留反斜杠
                    out.push(b'\\');
                    i += 1;
                }
            }
            b'\\' => {
                out.push(b'\\');
                i += 2;
            }
            b'"' => {
                out.push(b'"');
                i += 2;
            }
            _ => {
                out.push(b'\\');
                i += 1;
            }
        }
    }

    out
}

/// 解析 SCAN_RESULTS 的输出
/// 格式: bssid / frequency / signal level / flags / ssid
fn parse_scan_results(output: &str) -> Vec<Network> {
    let mut networks = Vec::new();
    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.splitn(5, '\t').collect();
        if parts.len() < 5 {
            continue;
        }

        let rssi: i32 = parts[2].trim().parse().unwrap_or(-100);
        let flags = parts[3];

        let ssid_bytes = unescape_wpa_ssid(parts[4]);
        let ssid = String::from_utf8_lossy(&ssid_bytes).to_string();

        // 隐藏网络（空 SSID 或全零字节）无法在页面上选择
        if ssid.is_empty() || ssid.chars().all(|c| c == '\0') {
            continue;
        }

        let secure = ["WPA", "RSN", "WEP", "SAE"]
            .iter()
            .any(|marker| flags.contains(marker));

        networks.push(Network { ssid, rssi, secure });
    }
    networks
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN_RESULTS: &str = "bssid / frequency / signal level / flags / ssid\n\
        aa:bb:cc:dd:ee:01\t2412\t-45\t[WPA2-PSK-CCMP][ESS]\tHome\n\
        aa:bb:cc:dd:ee:02\t2437\t-75\t[ESS]\tCafe\n\
        aa:bb:cc:dd:ee:03\t5180\t-61\t[RSN-SAE-CCMP][ESS]\tOffice 5G\n\
        aa:bb:cc:dd:ee:04\t2462\t-80\t[WPA2-PSK-CCMP][ESS]\t\n\
        aa:bb:cc:dd:ee:05\t2412\t-90\t[WEP][ESS]\t\\xe5\\xae\\xb6\n";

    #[test]
    fn parses_rssi_and_security_in_order() {
        let networks = parse_scan_results(SCAN_RESULTS);
        let summary: Vec<(&str, i32, bool)> = networks
            .iter()
            .map(|n| (n.ssid.as_str(), n.rssi, n.secure))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Home", -45, true),
                ("Cafe", -75, false),
                ("Office 5G", -61, true),
                ("家", -90, true),
            ]
        );
    }

    #[test]
    fn skips_header_and_short_lines() {
        let networks = parse_scan_results("bssid / frequency\nbroken line\n");
        assert!(networks.is_empty());
    }

    #[test]
    fn unescape_keeps_malformed_sequences_literal() {
        assert_eq!(unescape_wpa_ssid(r"a\xZZ"), br"a\xZZ".to_vec());
        assert_eq!(unescape_wpa_ssid(r"back\\slash"), br"back\slash".to_vec());
        assert_eq!(unescape_wpa_ssid("trailing\\"), b"trailing\\".to_vec());
    }
}
