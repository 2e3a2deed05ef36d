/// 导入配置 - import pipeline and registry client settings
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HEADER_SCAN_ROWS | 20 | 表头检测扫描的行数 |
/// | HEADER_MIN_MATCHES | 5 | 判定为表头所需的字段数 |
/// | MAX_IMPORT_BYTES | 10485760 | 上传文件大小上限 |
/// | REGISTRY_API_URL | http://localhost:3000/api | 会员 API 地址 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (未设置则输出到终端) |
///
/// # 示例
///
/// ```ignore
/// REGISTRY_API_URL=https://registry.example.org/api member-import members.xlsx --submit
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Rows scanned when looking for the header row
    pub header_scan_rows: usize,
    /// Distinct canonical fields a row needs to count as the header
    pub header_min_matches: usize,
    /// Upload size limit in bytes
    pub max_import_bytes: u64,
    /// Registry REST API base URL
    pub api_base_url: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// tracing max level
    pub log_level: String,
    /// Daily rolling log directory
    pub log_dir: Option<String>,
}

pub const DEFAULT_HEADER_SCAN_ROWS: usize = 20;
pub const DEFAULT_HEADER_MIN_MATCHES: usize = 5;
pub const DEFAULT_MAX_IMPORT_BYTES: u64 = 10 * 1024 * 1024;

impl ImportConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            header_scan_rows: env_parse("HEADER_SCAN_ROWS").unwrap_or(defaults.header_scan_rows),
            header_min_matches: env_parse("HEADER_MIN_MATCHES")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.header_min_matches),
            max_import_bytes: env_parse("MAX_IMPORT_BYTES").unwrap_or(defaults.max_import_bytes),
            api_base_url: std::env::var("REGISTRY_API_URL").unwrap_or(defaults.api_base_url),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Point the client at another API, keeping everything else
    ///
    /// 常用于测试场景
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            header_min_matches: DEFAULT_HEADER_MIN_MATCHES,
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
            api_base_url: "http://localhost:3000/api".into(),
            request_timeout_ms: 30000,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.header_scan_rows, 20);
        assert_eq!(config.header_min_matches, 5);
        assert_eq!(config.max_import_bytes, 10 * 1024 * 1024);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_with_api_base_url() {
        let config = ImportConfig::default().with_api_base_url("http://127.0.0.1:9/api");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9/api");
        assert_eq!(config.header_scan_rows, DEFAULT_HEADER_SCAN_ROWS);
    }
}
