//! In-Memory Object Storage - 内存对象存储实现
//!
//! 实现 ObjectStoragePort trait，对象保存在进程内 HashMap。
//! 测试中用于断言产物 key、内容与覆盖语义；可配置为全部写入失败。

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::application::ports::{ByteStream, ObjectStoragePort, UploadError, UploadTarget};

/// 已存储的对象
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// 内存对象存储
#[derive(Default)]
pub struct InMemoryObjectStorage {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    fail_writes: bool,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有写入均以 ServiceError 失败的变体
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// 读取对象（测试断言用）
    pub fn get(&self, container: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .ok()?
            .get(&(container.to_string(), key.to_string()))
            .cloned()
    }

    /// 当前对象数量
    pub fn object_count(&self) -> usize {
        self.objects.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn store(&self, target: &UploadTarget, data: Vec<u8>) -> Result<(), UploadError> {
        if self.fail_writes {
            return Err(UploadError::ServiceError(
                "injected storage failure".to_string(),
            ));
        }

        let mut objects = self
            .objects
            .lock()
            .map_err(|_| UploadError::ServiceError("object map poisoned".to_string()))?;

        // 相同 key 覆盖写入
        objects.insert(
            (target.container.clone(), target.key.clone()),
            StoredObject {
                content_type: target.content_type.clone(),
                data,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl ObjectStoragePort for InMemoryObjectStorage {
    async fn put_stream(
        &self,
        target: &UploadTarget,
        mut body: ByteStream,
    ) -> Result<(), UploadError> {
        let mut data = Vec::new();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| UploadError::NetworkError(e.to_string()))?;
            data.extend_from_slice(&chunk);
        }
        self.store(target, data)
    }

    async fn put_bytes(&self, target: &UploadTarget, data: Vec<u8>) -> Result<(), UploadError> {
        self.store(target, data)
    }
}
