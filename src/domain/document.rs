//! 文档引用与产物命名
//!
//! DocumentRef 定位对象存储中的源文档；产物 key 由源文档名和
//! 1 起始的块序号确定性派生，重复调用得到相同的 key（覆盖而非版本化）。

/// 源文档在对象存储中的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// 容器（bucket）名
    pub container: String,
    /// 对象 key
    pub key: String,
}

impl DocumentRef {
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }

    /// 文档主干名：key 的最后一段路径去掉扩展名
    ///
    /// `"inbox/report.pdf"` -> `"report"`
    pub fn stem(&self) -> &str {
        let name = self.key.rsplit('/').next().unwrap_or(&self.key);
        match name.rfind('.') {
            Some(i) if i > 0 => &name[..i],
            _ => name,
        }
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}

/// 音频分段产物 key: `<prefix>/<stem>_part<N>.<ext>`，N 从 1 开始
pub fn artifact_key(prefix: &str, stem: &str, index: usize, extension: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("{}_part{}.{}", stem, index, extension)
    } else {
        format!("{}/{}_part{}.{}", prefix, stem, index, extension)
    }
}

/// 清单产物 key: `<prefix>/<stem>_manifest.json`
pub fn manifest_key(prefix: &str, stem: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("{}_manifest.json", stem)
    } else {
        format!("{}/{}_manifest.json", prefix, stem)
    }
}
