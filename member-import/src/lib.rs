//! Member Import - 党员名册表格导入
//!
//! # 架构概述
//!
//! Turns an uploaded spreadsheet with unknown column order, naming and locale
//! into validated canonical member records:
//!
//! - **解析** (`sheet`): xlsx/xls/csv bytes → cell grid
//! - **表头** (`alias`, `header`): alias resolution and header row detection
//! - **映射** (`mapper`, `normalize`, `draft`): sparse field maps → normalized drafts
//! - **校验** (`validate`): fail-fast per-row rules
//! - **导入** (`batch`, `form`, `store`): bulk import with duplicate detection,
//!   and the single-record form prefill
//! - **导出** (`export`): CSV/XLSX export and the import template
//! - **API** (`client`): submission to the registry REST API
//!
//! # 模块结构
//!
//! ```text
//! member-import/src/
//! ├── config.rs      # 环境变量配置
//! ├── error.rs       # 结构性错误
//! ├── logger.rs      # 日志
//! ├── sheet.rs       # 表格解码
//! ├── alias.rs       # 列名别名
//! ├── header.rs      # 表头检测
//! ├── mapper.rs      # 行映射
//! ├── normalize.rs   # 字段规范化
//! ├── draft.rs       # 待校验记录
//! ├── validate.rs    # 行校验
//! ├── store.rs       # 去重存储
//! ├── batch.rs       # 批量导入
//! ├── form.rs        # 单条导入
//! ├── export.rs      # 导出
//! └── client.rs      # REST 客户端
//! ```

pub mod alias;
pub mod batch;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod export;
pub mod form;
pub mod header;
pub mod logger;
pub mod mapper;
pub mod normalize;
pub mod sheet;
pub mod store;
pub mod validate;

// Re-export 公共类型
pub use alias::ColumnAliasResolver;
pub use batch::{BatchImporter, ImportReport};
pub use client::{ClientError, ClientResult, RegistryClient, SubmitReport};
pub use config::ImportConfig;
pub use draft::{ImportClock, MemberDraft};
pub use error::{ImportError, ImportResult};
pub use form::{FormPrefill, prefill_from_file, prefill_from_grid, submit_form};
pub use header::{ColumnMap, HeaderDetection, HeaderRowDetector};
pub use mapper::MappedRow;
pub use sheet::{Cell, Grid, SheetFormat};
pub use store::{InMemoryStore, MemberStore};
pub use validate::{RowError, ValidationMode};

// Re-export logger functions
pub use logger::init_logger;

/// 设置环境 (dotenv, 日志)
///
/// Loads `.env` when present, then reads [`ImportConfig`] and starts the logger.
pub fn setup_environment() -> ImportConfig {
    dotenv::dotenv().ok();
    let config = ImportConfig::from_env();
    init_logger(&config);
    config
}
