//! 文本分块器
//!
//! 将整篇提取文本按词边界切分为长度受限的块，供语音合成使用。
//! 纯计算，无 I/O，结果确定。

/// 默认最大块字符数
/// 语音合成服务单次请求的安全上限（服务端硬限制 3000 字符）
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 2900;

/// 分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单块最大字符数
    pub max_chunk_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// 按词边界贪心分块
///
/// 策略：
/// 1. 按空白分词（连续空白/换行归一化为单个空格）
/// 2. 贪心地向当前块追加词；长度预算按"已有字符 + 分隔空格 + 新词"计算，
///    达到上限即封块，新词开启下一块
/// 3. 单个词本身超过上限时不再拆分，整词独占一块
///
/// 空输入返回空序列。用单个空格重新拼接所有块可完整还原词序列，
/// 无丢失、无重复。
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    let max = config.max_chunk_chars;
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if current.is_empty() {
            // 块首词无条件接收，超长词整词放行
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars < max {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// 使用默认配置分块（便捷方法）
pub fn chunk_text_default(text: &str) -> Vec<String> {
    chunk_text(text, &ChunkConfig::default())
}
