
// 默认把 ui/ 编译进二进制；开发时可以用 `ui_disk` 特性直接读磁盘。
#[cfg(not(feature = "ui_disk"))]
pub mod provider_embed;

#[cfg(feature = "ui_disk")]
pub mod provider_disk;
