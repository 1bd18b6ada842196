// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Host;

/// 将 URL 或域名归一化为裸主机名
///
/// 转小写，去掉协议、用户信息、路径、查询、端口、结尾的点以及开头的 `www.`。
/// 国际化域名转换为 punycode。
///
/// ```
/// use serptrack::utils::url_utils::normalize_domain;
///
/// assert_eq!(normalize_domain("https://www.Example.com:8443/path?q=1"), "example.com");
/// assert_eq!(normalize_domain("example.com/"), "example.com");
/// ```
pub fn normalize_domain(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    // Only a separator ahead of the first path, query or fragment delimiter is a scheme
    let delimiter = lowered.find(['/', '?', '#']).unwrap_or(lowered.len());
    let rest = match lowered.find("://").filter(|&idx| idx < delimiter) {
        Some(idx) => &lowered[idx + 3..],
        None => lowered.strip_prefix("//").unwrap_or(&lowered),
    };

    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority.rsplit('@').next().unwrap_or(authority);

    let host = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(idx) => &host_port[..=idx],
            None => host_port,
        }
    } else {
        host_port.split(':').next().unwrap_or(host_port)
    };
    let host = host.trim_end_matches('.');

    let host = match Host::parse(host) {
        Ok(Host::Domain(domain)) => domain,
        Ok(other) => other.to_string(),
        Err(_) => host.to_string(),
    };

    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// 判断结果 URL 是否属于目标主机
///
/// `target_host` 必须已经过 [`normalize_domain`] 处理。主机相同或是其子域名时匹配。
pub fn host_matches(result_url: &str, target_host: &str) -> bool {
    if target_host.is_empty() {
        return false;
    }
    let host = normalize_domain(result_url);
    if host.is_empty() {
        return false;
    }
    host == target_host
        || host
            .strip_suffix(target_host)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
